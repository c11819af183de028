use crate::types::TestResult;
use crate::workspace::WorkspaceInformation;

/// Asynchronous events streamed by the backend.
///
/// The backend delivers these over its event channel in emission order;
/// consumers rely on "run started" preceding the results that follow it.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// The backend re-scanned the workspace; the known-project set must be
    /// rebuilt from scratch.
    WorkspaceInformationUpdated(WorkspaceInformation),
    /// Execution of one test method is about to begin.
    TestRunStarted {
        /// Fully-qualified name of the method.
        method_name: String,
    },
    /// A batch of finished-test outcomes.
    TestResultsReported(Vec<TestResult>),
}
