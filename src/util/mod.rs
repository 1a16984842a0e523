//! Utility modules for sonar
//!
//! This module contains the diagnostics reporter, logging setup and
//! environment helpers used across the crate.

pub mod diag;
pub mod envar;
pub mod logging;

// Re-export the commonly used entry points
pub use envar::Envar;
pub use logging::init_logging;
