use crate::model::SuiteNode;
use omnitest_protocol::{BackendEvent, TestOutcome};
use serde::Serialize;

/// Events on the load channel exposed to the host UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TestLoadEvent {
    Started,
    Finished { suite: SuiteNode },
}

/// Events on the test-state channel exposed to the host UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TestRunEvent {
    /// A run began, either host-initiated (carrying the selected ids) or
    /// backend-reported for a single method.
    Started { tests: Vec<String> },
    /// One node changed state.
    #[serde(rename = "test")]
    TestStateChanged {
        test: String,
        state: TestState,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Finished,
}

/// UI node states understood by the test explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    Running,
    Passed,
    Failed,
    Skipped,
    Errored,
}

impl From<TestOutcome> for TestState {
    fn from(outcome: TestOutcome) -> Self {
        match outcome {
            TestOutcome::Passed => TestState::Passed,
            TestOutcome::Failed => TestState::Failed,
            TestOutcome::Skipped => TestState::Skipped,
            // The UI has no state for these; surface them as errored rather
            // than inventing a phantom state.
            TestOutcome::None | TestOutcome::NotFound => TestState::Errored,
        }
    }
}

/// Category of a finished host build task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCategory {
    Build,
    Rebuild,
    Clean,
    Test,
    Other,
}

impl TaskCategory {
    /// Only completed builds can invalidate test output artifacts.
    pub fn triggers_refresh(self) -> bool {
        matches!(self, TaskCategory::Build | TaskCategory::Rebuild)
    }
}

/// The controller's single intake queue: backend events, host triggers and
/// host requests, processed one at a time so refresh cycles never interleave
/// and start/result ordering is preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterEvent {
    Backend(BackendEvent),
    BuildTaskFinished { category: TaskCategory },
    LoadRequested,
    RunRequested { tests: Vec<String> },
    DebugRequested { tests: Vec<String> },
}
