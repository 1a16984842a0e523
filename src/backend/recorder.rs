//! In-memory backend
//!
//! Records every backend call in order. Used to observe the
//! instrumentation from tests and from embedding programs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread::ThreadId;

use crate::backend::{Backend, Payload};
use crate::registry::Marker;

/// A recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
	Event {
		marker: Marker,
		clock: u64,
		payload: Vec<Payload>,
		thread: ThreadId,
	},
	ProcessInit {
		loom: String,
		pid: u32,
	},
	ThreadInit {
		tid: i32,
	},
	AddCpu {
		index: i32,
	},
	ProcessInfo {
		rank: i32,
		size: i32,
	},
	Flush,
	ProcessFinalize,
}

/// Backend keeping every call in memory
#[derive(Debug)]
pub struct Recorder {
	name: &'static str,
	records: Mutex<Vec<Record>>,
	thread_ready: AtomicBool,
}

impl Default for Recorder {
	fn default() -> Self {
		Self::new()
	}
}

impl Recorder {
	/// A recorder whose thread state is not initialized yet
	#[must_use]
	pub const fn new() -> Self {
		Self::named("recorder")
	}

	/// A recorder selected under a custom name
	#[must_use]
	pub const fn named(name: &'static str) -> Self {
		Self {
			name,
			records: Mutex::new(Vec::new()),
			thread_ready: AtomicBool::new(false),
		}
	}

	/// A recorder whose thread state was set up by someone else
	#[must_use]
	pub fn initialized() -> Self {
		let recorder = Self::new();
		recorder.thread_ready.store(true, Ordering::SeqCst);
		recorder
	}

	fn push(&self, record: Record) {
		self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record);
	}

	/// Snapshot of every recorded call
	#[must_use]
	pub fn records(&self) -> Vec<Record> {
		self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}

	/// Markers of the recorded events, in emission order
	#[must_use]
	pub fn markers(&self) -> Vec<&'static str> {
		self.records()
			.iter()
			.filter_map(|record| match record {
				Record::Event { marker, .. } => Some(marker.as_str()),
				_ => None,
			})
			.collect()
	}

	/// Forget every recorded call
	pub fn clear(&self) {
		self.records.lock().unwrap_or_else(PoisonError::into_inner).clear();
	}
}

impl Backend for Recorder {
	fn name(&self) -> &'static str {
		self.name
	}

	fn emit(&self, marker: Marker, clock: u64, payload: &[Payload]) {
		self.push(Record::Event {
			marker,
			clock,
			payload: payload.to_vec(),
			thread: std::thread::current().id(),
		});
	}

	fn process_init(&self, loom: &str, pid: u32) {
		self.push(Record::ProcessInit {
			loom: loom.to_string(),
			pid,
		});
	}

	fn thread_init(&self, tid: i32) {
		self.thread_ready.store(true, Ordering::SeqCst);
		self.push(Record::ThreadInit { tid });
	}

	fn thread_is_ready(&self) -> bool {
		self.thread_ready.load(Ordering::SeqCst)
	}

	fn add_cpu(&self, index: i32) {
		self.push(Record::AddCpu { index });
	}

	fn set_process_info(&self, rank: i32, size: i32) {
		self.push(Record::ProcessInfo { rank, size });
	}

	fn flush(&self) {
		self.push(Record::Flush);
	}

	fn process_finalize(&self) {
		self.push(Record::ProcessFinalize);
	}
}
