//! Instrumentation runtime
//!
//! A [`Runtime`] ties together the symbol resolver, the operation
//! registry and the lifecycle controller. Wrappers reach the process-wide
//! runtime through [`runtime`]; programs embedding the instrumentation can
//! [`install`] their own before the first intercepted call.

mod builder;
mod config;
mod dispatch;
mod guard;
mod lifecycle;

pub use builder::RuntimeBuilder;
pub use config::{Config, INSTRUMENT_DEFAULT, INSTRUMENT_ENVAR, Mode};
pub use guard::Guard;
pub use lifecycle::{Lifecycle, LifecycleState, THREAD_END, THREAD_EXECUTE};

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{Result, SonarError};
use crate::fatal;
use crate::operation::Operation;
use crate::registry::Registry;
use crate::symbol::SymbolResolver;

// The runtime every wrapper dispatches through
static ACTIVE_RUNTIME: OnceCell<Runtime> = OnceCell::new();

/// Main runtime struct
///
/// Created through the [`RuntimeBuilder`].
#[derive(Debug)]
pub struct Runtime {
	resolver: SymbolResolver,
	lifecycle: Lifecycle,
	registry: Registry,
}

impl Runtime {
	pub(crate) const fn new(resolver: SymbolResolver, lifecycle: Lifecycle, registry: Registry) -> Self {
		Self {
			resolver,
			lifecycle,
			registry,
		}
	}

	/// Create a runtime builder
	#[must_use]
	pub fn builder() -> RuntimeBuilder {
		RuntimeBuilder::new()
	}

	/// Validate the registry and bring up the instrumentation
	///
	/// # Errors
	///
	/// Returns the first registry violation, or any error of
	/// [`Lifecycle::preinitialize`].
	pub fn preinitialize(&self) -> Result<()> {
		crate::util::init_logging();
		debug!("Preinitializing with log level {}", crate::util::logging::log_level());

		self.registry.validate()?;
		self.lifecycle.preinitialize()
	}

	/// Register the process identity
	///
	/// # Errors
	///
	/// See [`Lifecycle::initialize`].
	pub fn initialize(&self, rank: i32, size: i32) -> Result<()> {
		self.lifecycle.initialize(rank, size)
	}

	/// Finalize the instrumentation
	///
	/// # Errors
	///
	/// See [`Lifecycle::finalize`].
	pub fn finalize(&self) -> Result<()> {
		self.lifecycle.finalize()
	}

	/// Whether markers are currently emitted
	#[must_use]
	pub fn is_enabled(&self) -> bool {
		self.lifecycle.is_enabled()
	}

	/// Open an instrumentation scope for `operation`
	pub fn guard(&self, operation: Operation) -> Guard<'_> {
		Guard::enter(&self.lifecycle, self.registry.markers(operation))
	}

	#[must_use]
	pub const fn resolver(&self) -> &SymbolResolver {
		&self.resolver
	}

	#[must_use]
	pub const fn lifecycle(&self) -> &Lifecycle {
		&self.lifecycle
	}

	#[must_use]
	pub const fn registry(&self) -> &Registry {
		&self.registry
	}
}

/// Get the process-wide runtime, building the default one on first use
///
/// Failing to build the default runtime is a fatal error.
pub fn runtime() -> &'static Runtime {
	ACTIVE_RUNTIME.get_or_init(|| match RuntimeBuilder::new().build() {
		Ok(runtime) => runtime,
		Err(e) => fatal!("{e}"),
	})
}

/// Get the process-wide runtime if one is already in place
#[must_use]
pub fn get_active_runtime() -> Option<&'static Runtime> {
	ACTIVE_RUNTIME.get()
}

/// Install `runtime` as the process-wide runtime
///
/// # Errors
///
/// Returns [`SonarError::AlreadyInitialized`] if a runtime is already in
/// place, whether installed or built on first use.
pub fn install(runtime: Runtime) -> Result<&'static Runtime> {
	ACTIVE_RUNTIME
		.try_insert(runtime)
		.map_err(|_| SonarError::AlreadyInitialized)
}
