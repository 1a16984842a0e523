//! Diagnostics reporting
//!
//! Fatal errors and warnings are printed as a single `Error: ...` or
//! `Warning: ...` line on the error stream. Concurrent reporters are
//! serialized so that multi-part messages never interleave. A fatal error
//! aborts in debug builds, leaving a core for post-mortem inspection, and
//! exits with status 1 in release builds.
//!
//! The [`raw`] submodule provides the same reporting for contexts where
//! neither allocation nor locking is allowed.

use std::fmt;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

static OUTPUT_LOCK: Mutex<()> = Mutex::new(());

/// Severity of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	/// The process terminates after reporting
	Error,
	/// The process continues after reporting
	Warning,
}

impl Severity {
	/// Prefix printed in front of the message
	#[must_use]
	pub const fn prefix(self) -> &'static str {
		match self {
			Self::Error => "Error: ",
			Self::Warning => "Warning: ",
		}
	}
}

/// Format a message exactly as it is written to the error stream
#[must_use]
pub fn format_message(severity: Severity, args: fmt::Arguments<'_>) -> String {
	format!("{}{}\n", severity.prefix(), args)
}

fn emit(severity: Severity, args: fmt::Arguments<'_>) {
	let message = format_message(severity, args);

	let _guard = OUTPUT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
	let mut stderr = std::io::stderr().lock();
	let _ = stderr.write_all(message.as_bytes());
	let _ = stderr.flush();
}

fn terminate() -> ! {
	if cfg!(debug_assertions) {
		std::process::abort()
	} else {
		std::process::exit(1)
	}
}

/// Print an error message and terminate the process
pub fn fail(args: fmt::Arguments<'_>) -> ! {
	emit(Severity::Error, args);
	terminate()
}

/// Print an error message and terminate the process if `failure` holds
pub fn fail_if(failure: bool, args: fmt::Arguments<'_>) {
	if failure {
		fail(args);
	}
}

/// Print a warning message
pub fn warn(args: fmt::Arguments<'_>) {
	emit(Severity::Warning, args);
}

/// Print a warning message if `failure` holds
pub fn warn_if(failure: bool, args: fmt::Arguments<'_>) {
	if failure {
		warn(args);
	}
}

/// Report a fatal error and terminate the process
///
/// Takes `format!`-style arguments.
#[macro_export]
macro_rules! fatal {
	($($arg:tt)*) => {
		$crate::util::diag::fail(::std::format_args!($($arg)*))
	};
}

/// Report a warning and continue
///
/// Takes `format!`-style arguments.
#[macro_export]
macro_rules! warning {
	($($arg:tt)*) => {
		$crate::util::diag::warn(::std::format_args!($($arg)*))
	};
}

/// Allocation-free, lock-free reporting
///
/// Parts are written one by one straight to a file descriptor with
/// `write(2)`, which makes this usable from signal handlers and from very
/// early process startup.
pub mod raw {
	use super::Severity;
	use libc::c_int;
	use std::ffi::CStr;
	use std::os::unix::io::RawFd;

	/// A primitive value that can be written without allocating
	pub trait RawPart {
		/// Write the value to `out`
		fn emit(&self, out: &mut RawWriter);
	}

	/// Unbuffered writer over a raw file descriptor
	#[derive(Debug)]
	pub struct RawWriter {
		fd: RawFd,
	}

	impl RawWriter {
		/// Writer over an arbitrary file descriptor
		#[must_use]
		pub const fn new(fd: RawFd) -> Self {
			Self { fd }
		}

		/// Writer over the standard error descriptor
		#[must_use]
		pub const fn stderr() -> Self {
			Self::new(libc::STDERR_FILENO)
		}

		/// Write all of `bytes`, retrying on partial writes and `EINTR`
		pub fn write_bytes(&mut self, mut bytes: &[u8]) {
			while !bytes.is_empty() {
				let written = unsafe { libc::write(self.fd, bytes.as_ptr().cast(), bytes.len()) };
				if written < 0 {
					if errno() == libc::EINTR {
						continue;
					}
					return;
				}
				if written == 0 {
					return;
				}
				bytes = &bytes[written as usize..];
			}
		}

		/// Write a single part
		pub fn part(&mut self, part: &dyn RawPart) -> &mut Self {
			part.emit(self);
			self
		}

		/// Write a full report line: prefix, every part, newline
		pub fn report(&mut self, severity: Severity, parts: &[&dyn RawPart]) {
			self.write_bytes(severity.prefix().as_bytes());
			for part in parts {
				part.emit(self);
			}
			self.write_bytes(b"\n");
		}
	}

	fn errno() -> c_int {
		std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
	}

	/// Render `value` in decimal into the tail of `buf`
	fn format_decimal(mut value: u64, buf: &mut [u8; 20]) -> &[u8] {
		let mut start = buf.len();
		loop {
			start -= 1;
			buf[start] = b'0' + (value % 10) as u8;
			value /= 10;
			if value == 0 {
				break;
			}
		}
		&buf[start..]
	}

	macro_rules! impl_unsigned {
		($($ty:ty),*) => {
			$(impl RawPart for $ty {
				fn emit(&self, out: &mut RawWriter) {
					let mut buf = [0u8; 20];
					out.write_bytes(format_decimal(*self as u64, &mut buf));
				}
			})*
		};
	}

	macro_rules! impl_signed {
		($($ty:ty),*) => {
			$(impl RawPart for $ty {
				fn emit(&self, out: &mut RawWriter) {
					if *self < 0 {
						out.write_bytes(b"-");
					}
					let mut buf = [0u8; 20];
					out.write_bytes(format_decimal(self.unsigned_abs() as u64, &mut buf));
				}
			})*
		};
	}

	impl_unsigned!(u8, u16, u32, u64, usize);
	impl_signed!(i8, i16, i32, i64, isize);

	impl RawPart for char {
		fn emit(&self, out: &mut RawWriter) {
			let mut buf = [0u8; 4];
			out.write_bytes(self.encode_utf8(&mut buf).as_bytes());
		}
	}

	impl RawPart for &str {
		fn emit(&self, out: &mut RawWriter) {
			out.write_bytes(self.as_bytes());
		}
	}

	impl RawPart for &CStr {
		fn emit(&self, out: &mut RawWriter) {
			out.write_bytes(self.to_bytes());
		}
	}

	/// Print a warning without allocating or locking
	pub fn warn(parts: &[&dyn RawPart]) {
		RawWriter::stderr().report(Severity::Warning, parts);
	}

	/// Print an error without allocating or locking and terminate
	pub fn fail(parts: &[&dyn RawPart]) -> ! {
		RawWriter::stderr().report(Severity::Error, parts);
		if cfg!(debug_assertions) {
			std::process::abort()
		} else {
			unsafe { libc::_exit(1) }
		}
	}
}
