//! Test utilities shared across the plugin workspace
//!
//! This crate provides common testing infrastructure including:
//! - Serialized environment variable overrides ([`EnvVarGuard`])
//! - HOME directory isolation ([`HomeEnvTestGuard`])

pub mod env;
pub mod home;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use home::HomeEnvTestGuard;
