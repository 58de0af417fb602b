//! Handler for POST /password-reset/verify

use actix_web::{web, HttpResponse};

use verimail_core::errors::VerificationError;
use verimail_core::services::verification::{EmailDispatcher, VerificationStore};
use verimail_shared::types::response::ApiResponse;
use verimail_shared::utils::email::mask_email;

use crate::dto::VerifyResetRequest;
use crate::handlers::error::to_response;
use crate::state::AppState;

/// Check a password-reset token without consuming it.
///
/// Verification is read-only so the reset form can validate the link before
/// the user submits a new password; the token is removed later, when the
/// reset completes.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "token": "64-char hex token"
/// }
/// ```
///
/// # Responses
/// - 200: token matches and is still valid
/// - 400: missing fields or wrong token
/// - 404: no pending token for this address
/// - 410: the pending token expired
pub async fn verify_reset<E, S>(
    state: web::Data<AppState<E, S>>,
    request: web::Json<VerifyResetRequest>,
) -> HttpResponse
where
    E: EmailDispatcher + 'static,
    S: VerificationStore + 'static,
{
    let email = request.email.trim();
    let token = request.token.trim();
    if email.is_empty() || token.is_empty() {
        let field = if email.is_empty() { "email" } else { "token" };
        let error = VerificationError::MissingField {
            field: field.to_string(),
        };
        return to_response(&error, "Email and token are required");
    }

    log::info!("Verifying reset token for {}", mask_email(email));

    match state.reset_service.verify_reset_token(email, token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Token verified successfully")),
        Err(error) => {
            let message = user_message(&error);
            to_response(&error, &message)
        }
    }
}

fn user_message(error: &VerificationError) -> String {
    match error {
        VerificationError::NotFound => "Invalid or expired reset link".to_string(),
        VerificationError::Expired => {
            "Reset link has expired. Please request a new one.".to_string()
        }
        VerificationError::InvalidToken => "Invalid reset link".to_string(),
        _ => "Something went wrong. Please try again later.".to_string(),
    }
}
