use async_trait::async_trait;
use omnitest_protocol::workspace::{
    DotNetConfiguration, DotNetProject, DotNetWorkspaceInformation, WorkspaceInformation,
};
use omnitest_protocol::{BackendError, TestBackend, TestInfo};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

/// Fixed "build finished" instant used for artifact mtimes, safely in the
/// past relative to the adapter's initial observation.
pub const BUILT_AT: u64 = 1_700_000_000;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Discover {
        source_file: String,
        framework: String,
        no_build: bool,
    },
    Run {
        method: String,
        source_file: String,
        no_build: bool,
    },
    RunUnit {
        unit: String,
        methods: Vec<String>,
        source_file: String,
        no_build: bool,
    },
    Debug {
        method: String,
        source_file: String,
        no_build: bool,
    },
    DebugUnit {
        unit: String,
        methods: Vec<String>,
        source_file: String,
        no_build: bool,
    },
}

#[derive(Default)]
struct MockState {
    calls: Mutex<Vec<BackendCall>>,
    discovery: Mutex<HashMap<String, Vec<TestInfo>>>,
    fail_discovery: Mutex<bool>,
}

/// Scripted backend that records every call it receives. Clones share state,
/// so tests can keep a handle while the adapter owns another.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_discovery(&self, source_file: &str, tests: Vec<TestInfo>) {
        self.state
            .discovery
            .lock()
            .unwrap()
            .insert(source_file.to_string(), tests);
    }

    pub fn fail_discovery(&self, fail: bool) {
        *self.state.fail_discovery.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.state.calls.lock().unwrap().clear();
    }

    pub fn discover_calls(&self) -> Vec<BackendCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, BackendCall::Discover { .. }))
            .collect()
    }

    fn record(&self, call: BackendCall) {
        self.state.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TestBackend for MockBackend {
    async fn discover_tests(
        &self,
        source_file: &str,
        framework: &str,
        no_build: bool,
    ) -> Result<Vec<TestInfo>, BackendError> {
        self.record(BackendCall::Discover {
            source_file: source_file.to_string(),
            framework: framework.to_string(),
            no_build,
        });
        if *self.state.fail_discovery.lock().unwrap() {
            return Err(BackendError::Request("discovery failed".into()));
        }
        Ok(self
            .state
            .discovery
            .lock()
            .unwrap()
            .get(source_file)
            .cloned()
            .unwrap_or_default())
    }

    async fn run_test(
        &self,
        method: &str,
        source_file: &str,
        _framework: &str,
        no_build: bool,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::Run {
            method: method.to_string(),
            source_file: source_file.to_string(),
            no_build,
        });
        Ok(())
    }

    async fn run_tests_in_unit(
        &self,
        unit: &str,
        methods: &[String],
        source_file: &str,
        _framework: &str,
        no_build: bool,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::RunUnit {
            unit: unit.to_string(),
            methods: methods.to_vec(),
            source_file: source_file.to_string(),
            no_build,
        });
        Ok(())
    }

    async fn debug_test(
        &self,
        method: &str,
        source_file: &str,
        _framework: &str,
        no_build: bool,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::Debug {
            method: method.to_string(),
            source_file: source_file.to_string(),
            no_build,
        });
        Ok(())
    }

    async fn debug_tests_in_unit(
        &self,
        unit: &str,
        methods: &[String],
        source_file: &str,
        _framework: &str,
        no_build: bool,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::DebugUnit {
            unit: unit.to_string(),
            methods: methods.to_vec(),
            source_file: source_file.to_string(),
            no_build,
        });
        Ok(())
    }
}

pub fn test_info(full_name: &str, display: &str, file: &str, line: i32) -> TestInfo {
    TestInfo {
        fully_qualified_name: full_name.into(),
        display_name: display.into(),
        code_file_path: file.into(),
        line_number: line,
    }
}

/// Creates a build artifact in `dir` with its mtime pinned to [`BUILT_AT`].
pub fn write_artifact(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let file = fs::File::create(&path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(BUILT_AT))
        .unwrap();
    path
}

/// Bumps an artifact's mtime by `offset_secs` past [`BUILT_AT`], simulating a
/// rebuild.
pub fn rebuild_artifact(path: &Path, offset_secs: u64) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(BUILT_AT + offset_secs))
        .unwrap();
}

/// Workspace metadata in the `DotNet` shape: one entry per
/// `(name, path, source_file, artifact)` project.
pub fn dotnet_workspace(projects: &[(&str, &str, &str, &Path)]) -> WorkspaceInformation {
    WorkspaceInformation {
        dot_net: Some(DotNetWorkspaceInformation {
            projects: projects
                .iter()
                .map(|(name, path, source_file, artifact)| DotNetProject {
                    name: name.to_string(),
                    path: path.to_string(),
                    source_files: vec![source_file.to_string()],
                    configurations: vec![DotNetConfiguration {
                        compilation_output_assembly_file: artifact.to_string_lossy().into_owned(),
                    }],
                })
                .collect(),
        }),
        ms_build: None,
    }
}

/// Collects everything currently queued on a channel without blocking.
pub fn drain<T>(rx: &mut UnboundedReceiver<T>) -> Vec<T> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
