//! Cappy Common Utilities
//!
//! Shared infrastructure for all Cappy crates:
//! - Error types and result aliases
//! - Frame clock used to drive view animations
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
