//! Route table and health endpoint.
//!
//! `configure_routes` is generic over the mail dispatcher and store so the
//! same table serves the production binary and the integration tests.

use actix_web::{web, HttpResponse};

use verimail_core::services::verification::{EmailDispatcher, VerificationStore};

use crate::routes::verification;

/// Register the verification endpoints
pub fn configure_routes<E, S>(cfg: &mut web::ServiceConfig)
where
    E: EmailDispatcher + 'static,
    S: VerificationStore + 'static,
{
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/otp")
                .route("/send", web::post().to(verification::send_otp::<E, S>))
                .route("/verify", web::post().to(verification::verify_otp::<E, S>)),
        )
        .service(
            web::scope("/password-reset")
                .route("/send", web::post().to(verification::send_reset::<E, S>))
                .route(
                    "/verify",
                    web::post().to(verification::verify_reset::<E, S>),
                ),
        );
}

/// Liveness probe
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "verimail-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
