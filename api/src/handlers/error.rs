//! Mapping from domain failures to HTTP responses.
//!
//! Status mapping:
//! - 400: malformed input (bad email, missing field, wrong code, bad token)
//! - 404: no pending record for this identifier
//! - 410: the record existed but its expiry has passed
//! - 429: resend guard or attempt lockout
//! - 500: dispatch or store failures

use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use verimail_core::errors::VerificationError;
use verimail_shared::types::response::ApiResponse;

/// HTTP status for a domain failure
pub fn status_for(error: &VerificationError) -> StatusCode {
    match error {
        VerificationError::InvalidEmail
        | VerificationError::MissingField { .. }
        | VerificationError::CodeMismatch { .. }
        | VerificationError::InvalidToken => StatusCode::BAD_REQUEST,
        VerificationError::NotFound => StatusCode::NOT_FOUND,
        VerificationError::Expired => StatusCode::GONE,
        VerificationError::RateLimited { .. } | VerificationError::TooManyAttempts => {
            StatusCode::TOO_MANY_REQUESTS
        }
        VerificationError::DispatchFailed(_) | VerificationError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Build the error envelope for a domain failure.
///
/// `message` is the user-facing text; the technical detail stays in the
/// server log. Server-side failures log at error level, client mistakes
/// at warn.
pub fn to_response(error: &VerificationError, message: &str) -> HttpResponse {
    let status = status_for(error);
    if status.is_server_error() {
        log::error!("Request failed ({}): {}", error.code(), error);
    } else {
        log::warn!("Request rejected ({}): {}", error.code(), error);
    }
    HttpResponse::build(status).json(ApiResponse::error(error.code(), message))
}
