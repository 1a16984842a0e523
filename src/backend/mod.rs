//! Trace backends
//!
//! A backend records the markers emitted by the instrumentation, together
//! with a clock reading and an optional payload, and owns the per-process
//! and per-thread tracing state. The instrumentation never depends on the
//! trace format beyond the calls of the [`Backend`] trait.

mod recorder;
mod trace;

#[cfg(feature = "ovni")]
mod ovni;

use std::sync::Arc;

use nix::time::{ClockId, clock_gettime};

use crate::registry::Marker;

#[cfg(feature = "ovni")]
pub use ovni::OvniBackend;
pub use recorder::{Record, Recorder};
pub use trace::TraceBackend;

/// A value attached to an emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
	I32(i32),
	U64(u64),
}

impl Payload {
	/// Call `f` with the native-endian bytes of the value
	pub fn with_bytes<R>(self, f: impl FnOnce(&[u8]) -> R) -> R {
		match self {
			Self::I32(value) => f(&value.to_ne_bytes()),
			Self::U64(value) => f(&value.to_ne_bytes()),
		}
	}
}

/// Trait for trace backends
pub trait Backend: Send + Sync {
	/// Name under which the backend is selected in the configuration
	fn name(&self) -> &'static str;

	/// Current clock reading used to timestamp events
	fn clock_now(&self) -> u64 {
		monotonic_now()
	}

	/// Emit `marker` at `clock` with the given payload
	fn emit(&self, marker: Marker, clock: u64, payload: &[Payload]);

	/// Initialize the process state under the given loom identity
	fn process_init(&self, loom: &str, pid: u32);

	/// Initialize the state of the calling thread
	fn thread_init(&self, tid: i32);

	/// Whether the calling thread was already initialized
	fn thread_is_ready(&self) -> bool;

	/// Report an execution unit the process may run on
	fn add_cpu(&self, index: i32);

	/// Register the process identity once it is known
	fn set_process_info(&self, rank: i32, size: i32);

	/// Flush the events buffered by the calling thread
	fn flush(&self);

	/// Finalize the process state
	fn process_finalize(&self);
}

/// Nanoseconds on the monotonic clock
#[must_use]
pub fn monotonic_now() -> u64 {
	clock_gettime(ClockId::CLOCK_MONOTONIC).map_or(0, |ts| {
		(ts.tv_sec() as u64)
			.saturating_mul(1_000_000_000)
			.saturating_add(ts.tv_nsec() as u64)
	})
}

/// Backends available by default, in order of preference
#[must_use]
pub fn default_backends() -> Vec<Arc<dyn Backend>> {
	let mut backends: Vec<Arc<dyn Backend>> = Vec::new();

	#[cfg(feature = "ovni")]
	backends.push(Arc::new(OvniBackend::new()));

	backends.push(Arc::new(TraceBackend::new()));
	backends
}
