//! Application state shared by the request handlers

use std::sync::Arc;

use verimail_core::services::verification::{
    EmailDispatcher, KeyedLocks, OtpService, PasswordResetService, VerificationServiceConfig,
    VerificationStore,
};

/// Shared services handed to every request handler.
///
/// Both flows run over one store and one lock registry, so an OTP and a
/// reset token for the same address serialize consistently.
pub struct AppState<E, S>
where
    E: EmailDispatcher + 'static,
    S: VerificationStore + 'static,
{
    pub otp_service: Arc<OtpService<E, S>>,
    pub reset_service: Arc<PasswordResetService<E, S>>,
}

impl<E, S> AppState<E, S>
where
    E: EmailDispatcher + 'static,
    S: VerificationStore + 'static,
{
    pub fn new(mailer: Arc<E>, store: Arc<S>, config: VerificationServiceConfig) -> Self {
        let locks = Arc::new(KeyedLocks::new());
        Self {
            otp_service: Arc::new(OtpService::new(
                mailer.clone(),
                store.clone(),
                locks.clone(),
                config.clone(),
            )),
            reset_service: Arc::new(PasswordResetService::new(mailer, store, locks, config)),
        }
    }
}
