//! Logging utilities for sonar
//!
//! This module provides logging functionality for sonar.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Initialize logging once
static INIT: Once = Once::new();

/// Environment variable enabling debug logging
pub const DEBUG_ENVAR: &str = "SONAR_DEBUG";

/// Initialize the tracing system
///
/// This function sets up tracing with an `EnvFilter` that:
/// - Honors the `RUST_LOG` environment variable if set
/// - Uses the `SONAR_DEBUG` environment variable to control logging level
/// - Only logs warnings and errors by default, plus the events of the
///   `trace` backend
///
/// A subscriber already installed by the host program is left in place.
pub fn init_logging() {
	INIT.call_once(|| {
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if std::env::var(DEBUG_ENVAR).is_ok() {
				EnvFilter::new("sonar_rs=debug")
			} else {
				EnvFilter::new("sonar_rs=warn,sonar_rs::events=info")
			}
		});

		let _ = tracing_subscriber::registry()
			.with(fmt::layer().with_writer(std::io::stderr).with_target(true))
			.with(filter)
			.try_init();
	});
}

/// Get the current log level as a string
///
/// This function returns the current log level as a string:
/// - "trace" - Trace level
/// - "debug" - Debug level
/// - "info" - Info level
/// - "warn" - Warning level
/// - "error" - Error level
/// - "off" - Logging is disabled
#[must_use]
pub fn log_level() -> &'static str {
	if tracing::level_enabled!(tracing::Level::TRACE) {
		"trace"
	} else if tracing::level_enabled!(tracing::Level::DEBUG) {
		"debug"
	} else if tracing::level_enabled!(tracing::Level::INFO) {
		"info"
	} else if tracing::level_enabled!(tracing::Level::WARN) {
		"warn"
	} else if tracing::level_enabled!(tracing::Level::ERROR) {
		"error"
	} else {
		"off"
	}
}
