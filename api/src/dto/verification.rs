//! Request bodies for the verification endpoints.
//!
//! Field names mirror the client contract (camelCase). The submitted OTP
//! may arrive as a JSON string or number; both deserialize to the same
//! trimmed string so the comparison in the flow sees one canonical form.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub email: String,

    /// Optional display name used in the email greeting
    #[serde(default)]
    pub display_name_hint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,

    pub otp: OtpCode,

    /// When set, a successful verification leaves the code in place for a
    /// later consuming verification (the UI's two-phase confirm)
    #[serde(default)]
    pub skip_delete: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResetRequest {
    pub email: String,

    #[serde(default)]
    pub display_name_hint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResetRequest {
    pub email: String,
    pub token: String,
}

/// Submitted OTP, accepted as a JSON string or number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for OtpCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) => Ok(OtpCode(s.trim().to_string())),
            serde_json::Value::Number(n) => Ok(OtpCode(n.to_string())),
            _ => Err(de::Error::custom("otp must be a string or a number")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_accepts_string_and_number() {
        let from_string: VerifyOtpRequest =
            serde_json::from_value(serde_json::json!({
                "email": "user@example.com",
                "otp": " 123456 "
            }))
            .unwrap();
        let from_number: VerifyOtpRequest =
            serde_json::from_value(serde_json::json!({
                "email": "user@example.com",
                "otp": 123456
            }))
            .unwrap();

        assert_eq!(from_string.otp.as_str(), "123456");
        assert_eq!(from_string.otp, from_number.otp);
    }

    #[test]
    fn test_otp_rejects_other_json_types() {
        let result: Result<VerifyOtpRequest, _> = serde_json::from_value(serde_json::json!({
            "email": "user@example.com",
            "otp": ["1", "2"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_skip_delete_defaults_to_false() {
        let request: VerifyOtpRequest = serde_json::from_value(serde_json::json!({
            "email": "user@example.com",
            "otp": "123456"
        }))
        .unwrap();
        assert!(!request.skip_delete);

        let request: VerifyOtpRequest = serde_json::from_value(serde_json::json!({
            "email": "user@example.com",
            "otp": "123456",
            "skipDelete": true
        }))
        .unwrap();
        assert!(request.skip_delete);
    }

    #[test]
    fn test_display_name_hint_is_camel_case() {
        let request: SendOtpRequest = serde_json::from_value(serde_json::json!({
            "email": "user@example.com",
            "displayNameHint": "Jane Doe"
        }))
        .unwrap();
        assert_eq!(request.display_name_hint.as_deref(), Some("Jane Doe"));
    }
}
