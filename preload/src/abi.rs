//! Handle and argument types of the interposed MPI library
//!
//! Only the representation matters: wrappers never look inside the
//! arguments they forward. MPICH derivatives use integer handles, Open MPI
//! uses pointers to opaque structures.

use std::ffi::{c_int, c_void};

#[cfg(all(feature = "mpich", feature = "openmpi"))]
compile_error!("features `mpich` and `openmpi` are mutually exclusive");

#[cfg(not(any(feature = "mpich", feature = "openmpi")))]
compile_error!("one of the features `mpich` or `openmpi` must be enabled");

#[cfg(feature = "mpich")]
mod handles {
	use std::ffi::c_int;

	pub type Comm = c_int;
	pub type Datatype = c_int;
	pub type Op = c_int;
	pub type Request = c_int;
}

#[cfg(feature = "openmpi")]
mod handles {
	use std::ffi::c_void;

	pub type Comm = *mut c_void;
	pub type Datatype = *mut c_void;
	pub type Op = *mut c_void;
	pub type Request = *mut c_void;
}

pub use handles::{Comm, Datatype, Op, Request};

/// `MPI_Status`, only ever handled through pointers
pub type Status = c_void;

/// `MPI_Fint`
pub type Fint = c_int;

/// Element count of the regular flavor
pub type Count = c_int;

/// `MPI_Count`, element count of the large flavor
pub type LargeCount = i64;

/// `MPI_Aint`, displacement of the large flavor
pub type Aint = isize;

pub type SendBuf = *const c_void;
pub type RecvBuf = *mut c_void;

/// `MPI_SUCCESS`
pub const SUCCESS: c_int = 0;

/// Fortran handle of `MPI_COMM_WORLD`
#[cfg(feature = "mpich")]
pub const FORTRAN_COMM_WORLD: Fint = 0x4400_0000;

/// Fortran handle of `MPI_COMM_WORLD`
#[cfg(feature = "openmpi")]
pub const FORTRAN_COMM_WORLD: Fint = 0;

/// `MPI_COMM_WORLD`
#[cfg(feature = "mpich")]
pub fn comm_world(_runtime: &sonar_rs::Runtime) -> sonar_rs::Result<Comm> {
	Ok(0x4400_0000)
}

/// `MPI_COMM_WORLD`, the address of the predefined communicator object
#[cfg(feature = "openmpi")]
pub fn comm_world(runtime: &sonar_rs::Runtime) -> sonar_rs::Result<Comm> {
	Ok(runtime.resolver().resolve("ompi_mpi_comm_world")?.as_ptr())
}
