//! Scoped instrumentation guard

use crate::backend::Backend;
use crate::registry::MarkerPair;
use crate::runtime::lifecycle::Lifecycle;

/// Brackets the real call of an intercepted operation
///
/// Emits the enter marker on creation and the exit marker when dropped,
/// on every exit path including unwinding. The backend is captured on
/// entry, so a guard that emitted an enter marker always emits the
/// matching exit marker.
#[must_use = "the exit marker is emitted when the guard is dropped"]
pub struct Guard<'a> {
	backend: Option<&'a dyn Backend>,
	markers: &'static MarkerPair,
}

impl<'a> Guard<'a> {
	/// Emit the enter marker of `markers` if instrumentation is enabled
	pub fn enter(lifecycle: &'a Lifecycle, markers: &'static MarkerPair) -> Self {
		let backend = lifecycle.active_backend();
		if let Some(backend) = backend {
			backend.emit(markers.enter, backend.clock_now(), &[]);
		}
		Self { backend, markers }
	}

	/// Whether the guard emits markers
	#[must_use]
	pub fn is_active(&self) -> bool {
		self.backend.is_some()
	}
}

impl Drop for Guard<'_> {
	fn drop(&mut self) {
		if let Some(backend) = self.backend {
			backend.emit(self.markers.exit, backend.clock_now(), &[]);
		}
	}
}

impl std::fmt::Debug for Guard<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Guard")
			.field("backend", &self.backend.map(|backend| backend.name()))
			.field("markers", self.markers)
			.finish()
	}
}
