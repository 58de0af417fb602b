//! Verification endpoints: OTP issue/verify and reset-token issue/verify.

pub mod send_otp;
pub mod send_reset;
pub mod verify_otp;
pub mod verify_reset;

pub use send_otp::send_otp;
pub use send_reset::send_reset;
pub use verify_otp::verify_otp;
pub use verify_reset::verify_reset;
