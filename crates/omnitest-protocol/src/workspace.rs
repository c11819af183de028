use serde::{Deserialize, Serialize};

/// Workspace metadata update. The backend knows two project systems; either
/// or both sections may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkspaceInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_net: Option<DotNetWorkspaceInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ms_build: Option<MsBuildWorkspaceInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DotNetWorkspaceInformation {
    #[serde(default)]
    pub projects: Vec<DotNetProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DotNetProject {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub source_files: Vec<String>,
    /// One build configuration per output artifact.
    #[serde(default)]
    pub configurations: Vec<DotNetConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DotNetConfiguration {
    pub compilation_output_assembly_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MsBuildWorkspaceInformation {
    #[serde(default)]
    pub projects: Vec<MsBuildProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MsBuildProject {
    pub assembly_name: String,
    pub path: String,
    /// The single built artifact for the project.
    pub target_path: String,
    #[serde(default)]
    pub source_files: Vec<String>,
}
