//! Call dispatch
//!
//! Every wrapper funnels through [`Runtime::process`]: resolve the real
//! implementation, bracket the call with the operation markers and hand
//! the result back untouched. The lifecycle entry points add the
//! preinitialization, identity registration and finalization steps around
//! the same dispatch.

use tracing::{debug, trace};

use crate::error::{Result, SonarError};
use crate::operation::CallSite;
use crate::runtime::Runtime;
use crate::{fatal, warning};

impl Runtime {
	/// Resolve `name` to a function pointer of type `F`
	///
	/// # Safety
	///
	/// `F` must be a function pointer type matching the signature of the
	/// real `name`.
	///
	/// # Errors
	///
	/// See [`crate::symbol::SymbolResolver::resolve`].
	pub unsafe fn resolve<F: Copy>(&self, name: &'static str) -> Result<F> {
		let address = self.resolver.resolve(name)?;
		Ok(unsafe { address.cast::<F>() })
	}

	/// Forward a call to the real implementation of `site`, instrumented
	///
	/// `forward` receives the real function and performs the call with the
	/// original arguments. Its result is returned untouched.
	///
	/// # Safety
	///
	/// `F` must be a function pointer type matching the signature of the
	/// real `site.name`.
	///
	/// # Errors
	///
	/// Fails only if the real implementation cannot be resolved, in which
	/// case `forward` is not called and no marker is emitted.
	pub unsafe fn try_process<F: Copy, R>(&self, site: &CallSite, forward: impl FnOnce(F) -> R) -> Result<R> {
		let address = self.resolver.resolve_cached(site.name, &site.real)?;
		let real = unsafe { address.cast::<F>() };
		trace!(
			"{} ({:?}, {:?}) -> {}",
			site.name,
			site.binding,
			site.flavor,
			site.operation.name()
		);

		let _guard = self.guard(site.operation);
		Ok(forward(real))
	}

	/// Forward a call to the real implementation of `site`, instrumented
	///
	/// An unresolvable real implementation is a fatal error.
	///
	/// # Safety
	///
	/// See [`Runtime::try_process`].
	pub unsafe fn process<F: Copy, R>(&self, site: &CallSite, forward: impl FnOnce(F) -> R) -> R {
		match unsafe { self.try_process(site, forward) } {
			Ok(result) => result,
			Err(e) => fatal!("{e}"),
		}
	}

	/// Dispatch a library initialization entry point
	///
	/// Preinitializes the instrumentation, forwards the call, then queries
	/// the process identity through `identity` and registers it with the
	/// backend. The identity is only queried when instrumentation is
	/// enabled.
	///
	/// # Safety
	///
	/// See [`Runtime::try_process`].
	pub unsafe fn process_init<F: Copy, R>(
		&self,
		site: &CallSite,
		forward: impl FnOnce(F) -> R,
		identity: impl FnOnce(&Self) -> Result<(i32, i32)>,
	) -> R {
		match self.preinitialize() {
			Ok(()) => {},
			Err(SonarError::AlreadyInitialized) => {
				warning!("{} called with the instrumentation already initialized", site.name);
			},
			Err(e) => fatal!("{e}"),
		}

		let result = unsafe { self.process(site, forward) };

		if self.is_enabled() {
			let registered = identity(self).and_then(|(rank, size)| self.initialize(rank, size));
			if let Err(e) = registered {
				fatal!("{e}");
			}
		}

		result
	}

	/// Dispatch a library finalization entry point
	///
	/// The finalization markers are emitted before the instrumentation
	/// itself is finalized. Finalizing a library whose initialization was
	/// not intercepted is silent.
	///
	/// # Safety
	///
	/// See [`Runtime::try_process`].
	pub unsafe fn process_finalize<F: Copy, R>(&self, site: &CallSite, forward: impl FnOnce(F) -> R) -> R {
		let result = unsafe { self.process(site, forward) };

		match self.finalize() {
			Ok(()) => {},
			Err(SonarError::NotInitialized) => debug!("{} called without a wrapped initialization", site.name),
			Err(e) => warning!("{e}"),
		}

		result
	}
}
