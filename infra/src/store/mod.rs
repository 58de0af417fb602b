//! Verification store implementations

pub mod memory;

#[cfg(test)]
mod tests;

pub use memory::InMemoryVerificationStore;
