//! Runtime configuration

use crate::util::Envar;

/// Environment variable selecting the instrumentation
pub const INSTRUMENT_ENVAR: &str = "SONAR_MPI_INSTRUMENT";

/// Value of [`INSTRUMENT_ENVAR`] when it is not defined
pub const INSTRUMENT_DEFAULT: &str = "none";

/// Configuration of a runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Raw instrumentation selector
	pub instrument: String,
}

impl Default for Config {
	fn default() -> Self {
		Self::new(INSTRUMENT_DEFAULT)
	}
}

impl Config {
	/// A configuration with an explicit instrumentation selector
	#[must_use]
	pub fn new(instrument: impl Into<String>) -> Self {
		Self {
			instrument: instrument.into(),
		}
	}

	/// Read the configuration from the environment
	#[must_use]
	pub fn from_env() -> Self {
		let instrument = Envar::new(INSTRUMENT_ENVAR, INSTRUMENT_DEFAULT.to_string());
		Self::new(instrument.into_inner())
	}

	/// Interpret the instrumentation selector
	#[must_use]
	pub fn mode(&self) -> Mode<'_> {
		match self.instrument.as_str() {
			"off" | "none" => Mode::Disabled,
			"on" => Mode::Enabled(None),
			name => Mode::Enabled(Some(name)),
		}
	}
}

/// Requested instrumentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'a> {
	/// No markers are emitted
	Disabled,
	/// Markers are emitted through the named backend, or the preferred one
	Enabled(Option<&'a str>),
}
