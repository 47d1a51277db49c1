use serde::{Deserialize, Serialize};

use crate::{domain::ResultMap, error::ApiError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub sanitized: String,
    pub results: ResultMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_error: Option<String>,
    pub rendered: String,
    /// The range expansion stopped at a term or size limit.
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientRequest {
    Input { value: String },
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    ResultsUpdated {
        sanitized: String,
        results: ResultMap,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range_error: Option<String>,
        rendered: String,
        #[serde(default)]
        truncated: bool,
    },
    Unchanged {
        sanitized: String,
    },
    SessionReset,
    Error(ApiError),
}
