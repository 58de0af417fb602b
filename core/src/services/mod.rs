//! Domain services

pub mod verification;
