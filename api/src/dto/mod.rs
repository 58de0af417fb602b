//! Request DTOs

pub mod verification;

pub use verification::{OtpCode, SendOtpRequest, SendResetRequest, VerifyOtpRequest, VerifyResetRequest};
