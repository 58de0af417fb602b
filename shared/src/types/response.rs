//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
///
/// Every endpoint replies with this envelope; `message` carries the short,
/// non-technical text shown to the user and never contains a generated
/// secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable outcome message
    pub message: String,

    /// Machine-checkable outcome code (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    /// Create a successful response
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an error response with a machine-checkable code
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(code.into()),
            timestamp: Utc::now(),
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = ApiResponse::success("OTP sent successfully");
        assert!(response.is_success());
        assert_eq!(response.message, "OTP sent successfully");
        assert!(response.error.is_none());
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ApiResponse::error("NOT_FOUND", "No OTP found. Please request a new one.");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "NOT_FOUND");
    }

    #[test]
    fn test_success_response_omits_error_field() {
        let response = ApiResponse::success("ok");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("error").is_none());
    }
}
