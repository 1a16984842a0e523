//! sonar-rs - A framework for building instrumenting call interposers
//!
//! This framework provides tools for intercepting calls into a dynamically
//! linked library from a preloaded shared library, bracketing every call
//! with trace markers and forwarding it untouched to the real
//! implementation.
//!
//! # Getting Started
//!
//! ```rust,no_run
//! use std::ffi::c_int;
//!
//! sonar_rs::interpose! {
//!     binding = C;
//!
//!     fn MPI_Barrier(comm: c_int) -> c_int => Barrier;
//! }
//!
//! fn main() -> Result<(), sonar_rs::SonarError> {
//!     // Install a runtime before the first intercepted call
//!     let runtime = sonar_rs::builder()
//!         .config(sonar_rs::Config::new("on"))
//!         .build()?;
//!     sonar_rs::install(runtime)?;
//!
//!     // Calls to MPI_Barrier are traced once the wrapped MPI_Init has
//!     // preinitialized the runtime
//!     Ok(())
//! }
//! ```
//!
//! Without an explicit configuration the instrumentation is selected at
//! preinitialization through the `SONAR_MPI_INSTRUMENT` environment
//! variable: `none` or `off` (the default) disables it, `on` picks the
//! preferred backend and any backend name picks that backend.

extern crate self as sonar_rs;

pub mod backend;
pub mod error;
pub mod operation;
pub mod registry;
pub mod runtime;
pub mod symbol;
pub mod util;

pub use sonar_macros::{OperationTable, interpose};

pub use error::{Result, SonarError};
pub use operation::{Binding, CallSite, Flavor, Operation};
pub use runtime::{Config, Runtime, RuntimeBuilder, install, runtime};

/// Create a new runtime builder
#[must_use]
pub fn builder() -> RuntimeBuilder {
	RuntimeBuilder::new()
}
