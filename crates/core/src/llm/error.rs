use serde_json::Value;

/// Failure talking to the search model, with whatever the provider sent back.
#[derive(Debug, Clone, thiserror::Error)]
#[error("search model error (stage={stage}): {detail}")]
pub struct SearchDiagnosticsError {
    pub stage: &'static str,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}
