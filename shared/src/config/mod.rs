//! Configuration modules

pub mod server;

pub use server::ServerConfig;
