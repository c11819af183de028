use crate::types::TestInfo;
use async_trait::async_trait;
use thiserror::Error;

/// The only test framework identifier the backend currently accepts.
pub const MSTEST_FRAMEWORK: &str = "mstest";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Call surface of the external test runner.
///
/// Every operation addresses the backend through a source file belonging to
/// the project; the backend resolves the owning project from it, so any file
/// of the project works regardless of which tests are involved.
///
/// `no_build` asks the backend to skip rebuilding the project's compilation
/// unit before the operation; callers pass `true` once a unit has already
/// been built earlier in the same batch.
#[async_trait]
pub trait TestBackend: Send + Sync {
    /// Enumerate every test method reachable from `source_file`.
    async fn discover_tests(
        &self,
        source_file: &str,
        framework: &str,
        no_build: bool,
    ) -> Result<Vec<TestInfo>, BackendError>;

    /// Run one test method.
    async fn run_test(
        &self,
        method: &str,
        source_file: &str,
        framework: &str,
        no_build: bool,
    ) -> Result<(), BackendError>;

    /// Run several methods of one compilation unit in a single call.
    async fn run_tests_in_unit(
        &self,
        unit: &str,
        methods: &[String],
        source_file: &str,
        framework: &str,
        no_build: bool,
    ) -> Result<(), BackendError>;

    /// Run one test method under a debugger.
    async fn debug_test(
        &self,
        method: &str,
        source_file: &str,
        framework: &str,
        no_build: bool,
    ) -> Result<(), BackendError>;

    /// Debug several methods of one compilation unit in a single call.
    async fn debug_tests_in_unit(
        &self,
        unit: &str,
        methods: &[String],
        source_file: &str,
        framework: &str,
        no_build: bool,
    ) -> Result<(), BackendError>;
}
