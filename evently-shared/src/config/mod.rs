//! # Configuration
//!
//! Settings for reaching the auth provider from native front ends.

#[cfg(not(target_arch = "wasm32"))]
pub mod client;

#[cfg(not(target_arch = "wasm32"))]
pub use client::{ClientConfig, ConfigError};
