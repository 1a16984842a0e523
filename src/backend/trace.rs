//! Backend writing events through `tracing`

use std::cell::Cell;

use tracing::info;

use crate::backend::{Backend, Payload};
use crate::registry::Marker;

/// Target of every event logged by this backend
pub const EVENTS_TARGET: &str = "sonar_rs::events";

thread_local! {
	static THREAD_READY: Cell<bool> = const { Cell::new(false) };
}

/// Backend logging every marker as an `info` event
#[derive(Debug, Default)]
pub struct TraceBackend;

impl TraceBackend {
	#[must_use]
	pub const fn new() -> Self {
		Self
	}
}

impl Backend for TraceBackend {
	fn name(&self) -> &'static str {
		"trace"
	}

	fn emit(&self, marker: Marker, clock: u64, payload: &[Payload]) {
		if payload.is_empty() {
			info!(target: EVENTS_TARGET, %marker, clock, "event");
		} else {
			info!(target: EVENTS_TARGET, %marker, clock, ?payload, "event");
		}
	}

	fn process_init(&self, loom: &str, pid: u32) {
		info!(target: EVENTS_TARGET, loom, pid, "process init");
	}

	fn thread_init(&self, tid: i32) {
		THREAD_READY.with(|ready| ready.set(true));
		info!(target: EVENTS_TARGET, tid, "thread init");
	}

	fn thread_is_ready(&self) -> bool {
		THREAD_READY.with(Cell::get)
	}

	fn add_cpu(&self, index: i32) {
		info!(target: EVENTS_TARGET, index, "cpu");
	}

	fn set_process_info(&self, rank: i32, size: i32) {
		info!(target: EVENTS_TARGET, rank, size, "process info");
	}

	fn flush(&self) {}

	fn process_finalize(&self) {
		THREAD_READY.with(|ready| ready.set(false));
		info!(target: EVENTS_TARGET, "process finalize");
	}
}
