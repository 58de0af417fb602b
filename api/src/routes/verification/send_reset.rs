//! Handler for POST /password-reset/send

use actix_web::{web, HttpResponse};

use verimail_core::errors::VerificationError;
use verimail_core::services::verification::{EmailDispatcher, VerificationStore};
use verimail_shared::types::response::ApiResponse;
use verimail_shared::utils::email::mask_email;

use crate::dto::SendResetRequest;
use crate::handlers::error::to_response;
use crate::state::AppState;

/// Issue a password-reset token and dispatch the reset link by email.
///
/// Reset issuance carries no resend guard; a new request overwrites any
/// pending token for the same address.
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
/// - 200: token generated and dispatched
/// - 400: malformed or missing email
/// - 500: email dispatch or store failure
pub async fn send_reset<E, S>(
    state: web::Data<AppState<E, S>>,
    request: web::Json<SendResetRequest>,
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

    log::info!("Processing reset-token request for {}", mask_email(email));

    match state
        .reset_service
        .send_reset_token(email, request.display_name_hint.as_deref())
        .await
    {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::success("Password reset email sent")),
        Err(error) => {
            let message = user_message(&error);
            to_response(&error, &message)
        }
    }
}

fn user_message(error: &VerificationError) -> String {
    match error {
        VerificationError::InvalidEmail => "Invalid email address".to_string(),
        VerificationError::DispatchFailed(_) => {
            "Failed to send reset email. Please try again later.".to_string()
        }
        _ => "Something went wrong. Please try again later.".to_string(),
    }
}
