//! # Verimail Core
//!
//! Domain layer for the OTP and password-reset verification flows. This
//! crate owns the verification record entity, the error taxonomy, the store
//! and dispatcher seams, and the two flow services. It performs no I/O of
//! its own; concrete store and mail transport implementations live in the
//! infrastructure crate.

pub mod domain;
pub mod errors;
pub mod services;
