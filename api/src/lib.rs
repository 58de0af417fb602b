//! HTTP layer for the Verimail verification service.
//!
//! Exposes the OTP and password-reset endpoints over actix-web and maps
//! domain outcomes to HTTP statuses. Service construction happens in the
//! binary's composition root; everything here is generic over the mail
//! dispatcher and store implementations so tests can swap in mocks.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
