use serde::{Deserialize, Serialize};

/// One test method reported by a discovery call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestInfo {
    /// Unique backend identifier for the method; the correlation key for
    /// result events.
    pub fully_qualified_name: String,
    pub display_name: String,
    pub code_file_path: String,
    /// 1-based line of the method as the backend counts it. The backend
    /// points two lines below the method name (at the body), so UI positions
    /// subtract a fixed offset.
    pub line_number: i32,
}

/// Execution outcome of a single test, as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestOutcome {
    None,
    Passed,
    Failed,
    Skipped,
    NotFound,
}

/// One entry of a "results reported" batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestResult {
    /// Fully-qualified name of the method the result belongs to.
    pub method_name: String,
    pub outcome: TestOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_stack_trace: Option<String>,
    #[serde(default)]
    pub standard_output: Vec<String>,
    #[serde(default)]
    pub standard_error: Vec<String>,
}
