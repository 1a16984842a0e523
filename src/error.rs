//! Error types for sonar
//!
//! This module contains the error type and a result type shared by the
//! whole crate. Errors surface to the interposed program only through the
//! diagnostics reporter at the wrapper boundary.

use thiserror::Error;

/// Result type for sonar operations
pub type Result<T> = std::result::Result<T, SonarError>;

/// Error type for sonar operations
#[derive(Debug, Error)]
pub enum SonarError {
	/// The runtime or the instrumentation is already initialized
	#[error("The instrumentation is already initialized")]
	AlreadyInitialized,

	/// The instrumentation was not preinitialized
	#[error("The instrumentation is not initialized")]
	NotInitialized,

	/// The instrumentation was already finalized
	#[error("The instrumentation is already finalized")]
	Finalized,

	/// A configuration variable holds an unrecognized value
	#[error("Invalid value {value} for {name}")]
	InvalidConfig {
		/// Name of the configuration variable
		name: String,
		/// The rejected value
		value: String,
	},

	/// The real implementation of a wrapped symbol could not be found
	#[error("Could not find symbol {0}")]
	SymbolNotFound(String),

	/// A symbol name cannot be passed to the dynamic linker
	#[error("Invalid symbol name {0:?}")]
	InvalidSymbolName(String),

	/// Two non-alias registry entries share a marker
	#[error("Marker {0} is repeated")]
	RepeatedMarker(&'static str),

	/// An alias registry entry refers to a marker that was never registered
	#[error("Marker {0} is alias but not present")]
	MissingAliasTarget(&'static str),

	/// A marker is not made of exactly three ASCII characters
	#[error("Marker {0:?} is malformed")]
	MalformedMarker(&'static str),

	/// A marker table does not hold one entry per operation
	#[error("Marker table has {found} entries but {expected} operations exist")]
	TableSize {
		/// Number of operations
		expected: usize,
		/// Number of entries in the table
		found: usize,
	},

	/// Two backends were registered under the same name
	#[error("Backend {0} is registered twice")]
	DuplicateBackend(String),

	/// Instrumentation was enabled but no backend is available
	#[error("No instrumentation backend is available")]
	NoBackend,

	/// An operating system call failed
	#[error("System error: {0}")]
	Os(#[from] nix::Error),

	/// Other error
	#[error("{0}")]
	Other(String),
}

impl From<&str> for SonarError {
	fn from(s: &str) -> Self {
		Self::Other(s.to_string())
	}
}

impl From<String> for SonarError {
	fn from(s: String) -> Self {
		Self::Other(s)
	}
}
