//! Builder for creating runtimes
//!
//! This module contains the `RuntimeBuilder` struct, which configures the
//! symbol provider, the backends and the marker table of a [`Runtime`].

use std::collections::HashSet;
use std::sync::Arc;

use crate::backend::{Backend, default_backends};
use crate::error::{Result, SonarError};
use crate::operation::Operation;
use crate::registry::{MarkerPair, Registry};
use crate::runtime::{Config, Lifecycle, Runtime};
use crate::symbol::{NextSymbolProvider, SymbolProvider, SymbolResolver};

/// Builder for creating runtimes
///
/// Backends added through [`RuntimeBuilder::backend`] are preferred over
/// the default ones, in the order they were added.
pub struct RuntimeBuilder {
	/// Explicit configuration, read from the environment when absent
	config: Option<Config>,
	/// Provider of the real implementations
	provider: Option<Box<dyn SymbolProvider>>,
	/// Backends added by the user
	backends: Vec<Arc<dyn Backend>>,
	/// Whether the default backends are appended
	default_backends: bool,
	/// Marker table replacing the built-in one
	table: Option<&'static [MarkerPair]>,
}

impl Default for RuntimeBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for RuntimeBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let backends: Vec<_> = self.backends.iter().map(|backend| backend.name()).collect();
		f.debug_struct("RuntimeBuilder")
			.field("config", &self.config)
			.field("provider", &self.provider.as_ref().map_or("default", |provider| provider.name()))
			.field("backends", &backends)
			.field("default_backends", &self.default_backends)
			.field("table", &self.table.map(<[MarkerPair]>::len))
			.finish()
	}
}

impl RuntimeBuilder {
	/// Create a new runtime builder with default settings
	#[must_use]
	pub fn new() -> Self {
		Self {
			config: None,
			provider: None,
			backends: Vec::new(),
			default_backends: true,
			table: None,
		}
	}

	/// Use an explicit configuration instead of the environment
	#[must_use]
	pub fn config(mut self, config: Config) -> Self {
		self.config = Some(config);
		self
	}

	/// Set the provider resolving the real implementations
	#[must_use]
	pub fn symbol_provider<P: SymbolProvider + 'static>(mut self, provider: P) -> Self {
		self.provider = Some(Box::new(provider));
		self
	}

	/// Add a backend
	#[must_use]
	pub fn backend<B: Backend + 'static>(mut self, backend: Arc<B>) -> Self {
		self.backends.push(backend);
		self
	}

	/// Do not register the default backends
	#[must_use]
	pub const fn without_default_backends(mut self) -> Self {
		self.default_backends = false;
		self
	}

	/// Replace the built-in marker table
	///
	/// The table must hold one entry per [`Operation`]. Its contents are
	/// validated at preinitialization.
	#[must_use]
	pub const fn marker_table(mut self, table: &'static [MarkerPair]) -> Self {
		self.table = Some(table);
		self
	}

	/// Build the runtime
	///
	/// # Errors
	///
	/// Returns [`SonarError::DuplicateBackend`] if two backends share a
	/// name, or [`SonarError::TableSize`] if the marker table does not
	/// match the operations.
	pub fn build(self) -> Result<Runtime> {
		let mut backends = self.backends;
		if self.default_backends {
			backends.extend(default_backends());
		}

		let mut names = HashSet::with_capacity(backends.len());
		for backend in &backends {
			if !names.insert(backend.name()) {
				return Err(SonarError::DuplicateBackend(backend.name().to_string()));
			}
		}

		let registry = match self.table {
			Some(table) => Registry::new::<Operation>(table)?,
			None => Registry::builtin::<Operation>(),
		};

		let provider = self.provider.unwrap_or_else(|| Box::new(NextSymbolProvider::new()));
		let resolver = SymbolResolver::new(provider);
		let lifecycle = Lifecycle::new(self.config, backends);

		Ok(Runtime::new(resolver, lifecycle, registry))
	}
}
