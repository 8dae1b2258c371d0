//! # Acuity Shared
//!
//! Common types and interfaces used across all Acuity packages.

pub mod error;
pub mod level;
pub mod vitals;
pub mod outcome;
pub mod config;

// Re-exports
pub use error::*;
pub use level::*;
pub use vitals::*;
pub use outcome::*;
pub use config::*;
