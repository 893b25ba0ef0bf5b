//! The single result record emitted per invocation

use serde::{Deserialize, Serialize};

use crate::error::ControlError;

/// Final result. `success` always equals `exit_code == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    success: bool,
    message: String,
    exit_code: i32,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), 0)
    }

    pub fn failure(error: &ControlError) -> Self {
        Self::new(error.to_string(), error.exit_code())
    }

    fn new(message: String, exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            message,
            exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// One-line JSON record
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize result: {}", e);
                format!(
                    "{{\"success\":{},\"message\":{:?},\"exitCode\":{}}}",
                    self.success, self.message, self.exit_code
                )
            }
        }
    }
}

impl From<Result<String, ControlError>> for Outcome {
    fn from(result: Result<String, ControlError>) -> Self {
        match result {
            Ok(message) => Self::success(message),
            Err(e) => Self::failure(&e),
        }
    }
}
