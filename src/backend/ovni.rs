//! Backend emitting events into the ovni tracing library
//!
//! Only built with the `ovni` feature; links against `libovni`.

use std::ffi::CString;

use libc::{c_char, c_int, pid_t};
use tracing::warn;

use crate::backend::{Backend, Payload};
use crate::registry::{MARKER_LEN, Marker};

/// Storage for a `struct ovni_ev`
///
/// The library only touches the header and the payload it was given, both
/// of which fit comfortably in this buffer.
#[repr(C, align(8))]
struct RawEvent([u8; 64]);

#[link(name = "ovni")]
unsafe extern "C" {
	fn ovni_proc_init(app: c_int, loom: *const c_char, pid: c_int);
	fn ovni_proc_set_rank(rank: c_int, nranks: c_int);
	fn ovni_proc_fini();
	fn ovni_thread_init(tid: pid_t);
	fn ovni_thread_isready() -> c_int;
	fn ovni_add_cpu(index: c_int, phyid: c_int);
	fn ovni_flush();
	fn ovni_clock_now() -> u64;
	fn ovni_ev_set_clock(ev: *mut RawEvent, clock: u64);
	fn ovni_ev_set_mcv(ev: *mut RawEvent, mcv: *const c_char);
	fn ovni_payload_add(ev: *mut RawEvent, buf: *const u8, size: c_int);
	fn ovni_ev_emit(ev: *mut RawEvent);
}

/// Application identifier passed to `ovni_proc_init`
const APP_ID: c_int = 1;

/// Backend forwarding to libovni
#[derive(Debug, Default)]
pub struct OvniBackend;

impl OvniBackend {
	#[must_use]
	pub const fn new() -> Self {
		Self
	}
}

impl Backend for OvniBackend {
	fn name(&self) -> &'static str {
		"ovni"
	}

	fn clock_now(&self) -> u64 {
		unsafe { ovni_clock_now() }
	}

	fn emit(&self, marker: Marker, clock: u64, payload: &[Payload]) {
		let mut mcv = [0 as c_char; MARKER_LEN + 1];
		for (dst, src) in mcv.iter_mut().zip(marker.as_bytes()) {
			*dst = *src as c_char;
		}

		let mut ev = RawEvent([0; 64]);
		unsafe {
			ovni_ev_set_clock(&mut ev, clock);
			ovni_ev_set_mcv(&mut ev, mcv.as_ptr());
			for value in payload {
				value.with_bytes(|bytes| ovni_payload_add(&mut ev, bytes.as_ptr(), bytes.len() as c_int));
			}
			ovni_ev_emit(&mut ev);
		}
	}

	fn process_init(&self, loom: &str, pid: u32) {
		let Ok(loom) = CString::new(loom) else {
			warn!("Loom {loom:?} contains a NUL byte, process not initialized");
			return;
		};
		unsafe { ovni_proc_init(APP_ID, loom.as_ptr(), pid as c_int) };
	}

	fn thread_init(&self, tid: i32) {
		unsafe { ovni_thread_init(tid) };
	}

	fn thread_is_ready(&self) -> bool {
		unsafe { ovni_thread_isready() != 0 }
	}

	fn add_cpu(&self, index: i32) {
		unsafe { ovni_add_cpu(index, index) };
	}

	fn set_process_info(&self, rank: i32, size: i32) {
		unsafe { ovni_proc_set_rank(rank, size) };
	}

	fn flush(&self) {
		unsafe { ovni_flush() };
	}

	fn process_finalize(&self) {
		unsafe { ovni_proc_fini() };
	}
}
