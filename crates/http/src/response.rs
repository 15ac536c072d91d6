//! Uniform response envelope shared by every endpoint.
//!
//! Shapes follow the JSON:API-ish convention: a top-level `success` flag, a
//! `result` object keyed per operation, and an `errors` array on failure.

use serde::Serialize;

/// Top-level wrapper for every successful response body.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ResponseForm {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Informational strings; declared for the envelope shape, currently
    /// never populated by any handler.
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ResponseError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_info: Option<ResultInfo>,
}

impl ResponseForm {
    /// Build the standard success envelope around an operation-keyed result,
    /// e.g. `json!({"books": [...]})` or `json!({"book": {...}})`.
    pub fn success(result: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            ..Self::default()
        }
    }
}

/// A single error object within a failure body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResponseError {
    pub code: u16,
    pub source: String,
    pub title: String,
    pub message: String,
}

/// Page-based pagination metadata; declared for the envelope shape,
/// currently never populated by any handler.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ResultInfo {
    pub page: u32,
    pub per_page: u32,
    pub count: u32,
    pub total_count: u32,
}
