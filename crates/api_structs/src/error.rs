use serde::{Deserialize, Serialize};

/// Body of every non successful response
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<TriggerDebugInfo>,
}

/// Tells the caller of a rejected trigger what went wrong without leaking
/// the configured secret
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDebugInfo {
    /// `provided` or `missing`
    pub received_secret: String,
    /// `configured` or `not configured`
    pub expected_secret: String,
}
