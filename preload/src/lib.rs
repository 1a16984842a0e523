//! sonar - Preloadable MPI instrumentation
//!
//! Build this crate as a shared library and load it before the MPI library
//! (`LD_PRELOAD=libsonar.so`). Every supported MPI entry point, in both the
//! C and the Fortran bindings, is wrapped: the call is forwarded to the
//! real implementation and bracketed with the markers of its operation.
//!
//! Instrumentation is off unless `SONAR_MPI_INSTRUMENT` selects a backend
//! when the program calls `MPI_Init`. The handle representation of the MPI
//! library is selected with the `mpich` (default) or `openmpi` feature.

pub mod abi;
pub mod c;
pub mod fortran;

use sonar_rs::registry::{self, OperationTable};
use sonar_rs::util::diag::raw;
use sonar_rs::{Operation, SonarError};

#[cfg(all(target_os = "linux", not(test)))]
#[unsafe(link_section = ".init_array")]
#[used]
static CONSTRUCTOR: extern "C" fn() = check_operations;

/// Refuse to run with an inconsistent operation table
///
/// Runs when the library is loaded, before any wrapper can be reached.
pub extern "C" fn check_operations() {
	match registry::validate(Operation::TABLE) {
		Ok(()) => {},
		Err(SonarError::RepeatedMarker(marker)) => raw::fail(&[&"Marker ", &marker, &" is repeated"]),
		Err(SonarError::MissingAliasTarget(marker)) => {
			raw::fail(&[&"Marker ", &marker, &" is alias but not present"]);
		},
		Err(SonarError::MalformedMarker(marker)) => raw::fail(&[&"Marker ", &marker, &" is malformed"]),
		Err(_) => raw::fail(&[&"Operation table is invalid"]),
	}
}
