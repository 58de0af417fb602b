//! Shared types and utilities used across the Verimail workspace.
//!
//! This crate carries the pieces every layer needs: configuration structs,
//! the API response envelope, and email normalization helpers. It has no
//! knowledge of the domain services themselves.

pub mod config;
pub mod types;
pub mod utils;
