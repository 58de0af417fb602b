//! Handler for POST /otp/verify

use actix_web::{web, HttpResponse};

use verimail_core::errors::VerificationError;
use verimail_core::services::verification::{EmailDispatcher, VerificationStore};
use verimail_shared::types::response::ApiResponse;
use verimail_shared::utils::email::mask_email;

use crate::dto::VerifyOtpRequest;
use crate::handlers::error::to_response;
use crate::state::AppState;

/// Verify a submitted OTP.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "otp": "483920",
///     "skipDelete": false
/// }
/// ```
///
/// The `otp` field also accepts a JSON number. With `skipDelete` the code
/// survives a successful check for a later consuming verification.
///
/// # Responses
/// - 200: code matched
/// - 400: missing fields or wrong code
/// - 404: no pending code for this address
/// - 410: the pending code expired
/// - 429: attempt budget exhausted
pub async fn verify_otp<E, S>(
    state: web::Data<AppState<E, S>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    E: EmailDispatcher + 'static,
    S: VerificationStore + 'static,
{
    let email = request.email.trim();
    if email.is_empty() || request.otp.is_empty() {
        let field = if email.is_empty() { "email" } else { "otp" };
        let error = VerificationError::MissingField {
            field: field.to_string(),
        };
        return to_response(&error, "Email and OTP are required");
    }

    log::info!(
        "Verifying OTP for {} (skip_delete: {})",
        mask_email(email),
        request.skip_delete
    );

    match state
        .otp_service
        .verify_otp(email, request.otp.as_str(), request.skip_delete)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("OTP verified successfully")),
        Err(error) => {
            let message = user_message(&error);
            to_response(&error, &message)
        }
    }
}

fn user_message(error: &VerificationError) -> String {
    match error {
        VerificationError::NotFound => "No OTP found. Please request a new one.".to_string(),
        VerificationError::Expired => "OTP has expired. Please request a new one.".to_string(),
        VerificationError::TooManyAttempts => {
            "Too many failed attempts. Please request a new OTP.".to_string()
        }
        VerificationError::CodeMismatch { remaining_attempts } => {
            format!("Invalid OTP. {} attempts remaining.", remaining_attempts)
        }
        _ => "Something went wrong. Please try again later.".to_string(),
    }
}
