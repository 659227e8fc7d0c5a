//! API request and response types

use crate::transcript::DisplayMessage;
use serde::{Deserialize, Serialize};

/// Request to run one chat turn
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    /// Transcript shown so far, oldest first
    #[serde(default)]
    pub history: Vec<DisplayMessage>,
}

/// Request to flag a response
#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub option: String,
    #[serde(default)]
    pub messages: Vec<DisplayMessage>,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
