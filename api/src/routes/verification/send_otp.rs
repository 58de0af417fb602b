//! Handler for POST /otp/send

use actix_web::{web, HttpResponse};

use verimail_core::errors::VerificationError;
use verimail_core::services::verification::{EmailDispatcher, VerificationStore};
use verimail_shared::types::response::ApiResponse;
use verimail_shared::utils::email::mask_email;

use crate::dto::SendOtpRequest;
use crate::handlers::error::to_response;
use crate::state::AppState;

/// Issue a fresh OTP for an email-change request and dispatch it by email.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "displayNameHint": "Jane Doe"
/// }
/// ```
///
/// # Responses
/// - 200: code generated and dispatched
/// - 400: malformed or missing email
/// - 429: a previous code is still inside the resend guard
/// - 500: email dispatch or store failure
pub async fn send_otp<E, S>(
    state: web::Data<AppState<E, S>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    E: EmailDispatcher + 'static,
    S: VerificationStore + 'static,
{
    let email = request.email.trim();
    if email.is_empty() {
        let error = VerificationError::MissingField {
            field: "email".to_string(),
        };
        return to_response(&error, "Email is required");
    }

    log::info!("Processing OTP request for {}", mask_email(email));

    match state
        .otp_service
        .send_otp(email, request.display_name_hint.as_deref())
        .await
    {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::success("OTP sent successfully")),
        Err(error) => {
            let message = user_message(&error);
            to_response(&error, &message)
        }
    }
}

fn user_message(error: &VerificationError) -> String {
    match error {
        VerificationError::InvalidEmail => "Invalid email address".to_string(),
        VerificationError::RateLimited { retry_after_secs } => {
            // Round the wait up to whole minutes for the user-facing text
            let minutes = (retry_after_secs + 59) / 60;
            format!(
                "Please wait {} more minute(s) before requesting another OTP",
                minutes
            )
        }
        VerificationError::DispatchFailed(_) => {
            "Failed to send OTP email. Please try again later.".to_string()
        }
        _ => "Something went wrong. Please try again later.".to_string(),
    }
}
