use omnitest_protocol::workspace::{DotNetProject, MsBuildProject};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::SystemTime;

/// Backend line numbers point two lines below the method name; subtract this
/// to land UI markers on the declaration.
pub(crate) const LINE_OFFSET: i32 = 2;

/// One compiled unit known from workspace metadata.
///
/// Recreated wholesale on every workspace update; only the output-artifact
/// clock mutates in place during staleness checks. `path` is the stable map
/// key across refreshes.
#[derive(Debug, Clone)]
pub struct Project {
    /// UI-facing grouping key; also the assembly name test methods carry.
    pub name: String,
    pub path: String,
    /// Any file of the project; the backend resolves the owning project from
    /// it when addressing discovery and run calls.
    pub source_file: String,
    /// Output artifact path → last observed modification time.
    pub output_files: HashMap<PathBuf, SystemTime>,
}

impl Project {
    /// Builds a project from the `DotNet` metadata shape. Returns `None` when
    /// the project declares no source files (the backend cannot be addressed
    /// without one).
    pub fn from_dotnet(project: &DotNetProject) -> Option<Self> {
        let source_file = project.source_files.first()?.clone();
        let now = SystemTime::now();
        Some(Self {
            name: project.name.clone(),
            path: project.path.clone(),
            source_file,
            output_files: project
                .configurations
                .iter()
                .map(|c| (PathBuf::from(&c.compilation_output_assembly_file), now))
                .collect(),
        })
    }

    /// Builds a project from the `MsBuild` metadata shape.
    pub fn from_msbuild(project: &MsBuildProject) -> Option<Self> {
        let source_file = project.source_files.first()?.clone();
        let now = SystemTime::now();
        Some(Self {
            name: project.assembly_name.clone(),
            path: project.path.clone(),
            source_file,
            output_files: HashMap::from([(PathBuf::from(&project.target_path), now)]),
        })
    }
}

/// Suite node for one project (level 0). Id = project name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNode {
    pub id: String,
    pub label: String,
    pub file: String,
    pub line: i32,
    pub children: Vec<ClassNode>,
}

/// Suite node for one test class (level 1). Id = `{projectId}:{className}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNode {
    pub id: String,
    pub label: String,
    /// Shown on hover; the source file the class was grouped from.
    pub tooltip: String,
    pub file: String,
    pub line: i32,
    pub children: Vec<MethodNode>,
}

/// Leaf node for one test method (level 2).
/// Id = `{classId}:{fullyQualifiedName}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNode {
    pub id: String,
    pub label: String,
    pub file: String,
    pub line: i32,
    /// Backend identity; the correlation key for result events.
    pub full_name: String,
    /// Owning compilation unit; run calls are batched per assembly.
    pub assembly: String,
}

/// The root suite published to the UI: all known projects, in registration
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteNode {
    pub id: String,
    pub label: String,
    pub children: Vec<ProjectNode>,
}
