//! Common test utilities and helpers
//!
//! Shared functionality used across integration tests:
//! - Binary path resolution (via `get_extpack_binary`)
//! - Project fixture utilities (via `helpers`)

pub(crate) mod helpers;

// Re-export get_extpack_binary for convenient access
pub(crate) use helpers::get_extpack_binary;
