//! Instrumentation lifecycle
//!
//! The lifecycle moves through four states:
//!
//! ```text
//! Uninitialized --preinitialize--> Enabled | Disabled --finalize--> Finalized
//! ```
//!
//! Preinitialization happens once, before the real library initialization
//! runs. It reads the configuration, selects a backend and, when the
//! calling thread was not set up by someone else, brings up the backend
//! process and thread state itself. Only in that case does the lifecycle
//! own the backend teardown at finalization.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nix::unistd::{gethostname, gettid};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::backend::{Backend, Payload};
use crate::error::{Result, SonarError};
use crate::registry::Marker;
use crate::runtime::config::{Config, INSTRUMENT_ENVAR, Mode};

/// Marker emitted when the lifecycle starts executing the calling thread
pub const THREAD_EXECUTE: Marker = Marker::new("OHx");

/// Marker emitted when the lifecycle stops executing the calling thread
pub const THREAD_END: Marker = Marker::new("OHe");

/// Execution unit registered during lazy initialization
const LAZY_CPU: i32 = 0;

/// State of the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
	Uninitialized,
	Enabled {
		/// Whether the backend was brought up here and must be torn down here
		owns_finalize: bool,
	},
	Disabled,
	Finalized,
}

/// Lifecycle controller of the instrumentation
pub struct Lifecycle {
	state: Mutex<LifecycleState>,
	/// Mirror of `state` read on every intercepted call
	enabled: AtomicBool,
	backend: OnceCell<Arc<dyn Backend>>,
	backends: Vec<Arc<dyn Backend>>,
	config: Option<Config>,
}

impl std::fmt::Debug for Lifecycle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let backends: Vec<_> = self.backends.iter().map(|backend| backend.name()).collect();
		f.debug_struct("Lifecycle")
			.field("state", &self.state())
			.field("backend", &self.backend.get().map(|backend| backend.name()))
			.field("backends", &backends)
			.field("config", &self.config)
			.finish()
	}
}

impl Lifecycle {
	/// Create an uninitialized lifecycle
	///
	/// `backends` are in order of preference. Without an explicit `config`
	/// the configuration is read from the environment at preinitialization.
	#[must_use]
	pub fn new(config: Option<Config>, backends: Vec<Arc<dyn Backend>>) -> Self {
		Self {
			state: Mutex::new(LifecycleState::Uninitialized),
			enabled: AtomicBool::new(false),
			backend: OnceCell::new(),
			backends,
			config,
		}
	}

	fn lock(&self) -> MutexGuard<'_, LifecycleState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Current state
	#[must_use]
	pub fn state(&self) -> LifecycleState {
		*self.lock()
	}

	/// Whether markers are currently emitted
	#[must_use]
	pub fn is_enabled(&self) -> bool {
		self.enabled.load(Ordering::Acquire)
	}

	/// Backend receiving the markers, if instrumentation is enabled
	#[must_use]
	pub fn active_backend(&self) -> Option<&dyn Backend> {
		if self.is_enabled() {
			self.backend.get().map(|backend| &**backend)
		} else {
			None
		}
	}

	/// Names of the registered backends, in order of preference
	pub fn backend_names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.backends.iter().map(|backend| backend.name())
	}

	/// Read the configuration and bring up the selected backend
	///
	/// # Errors
	///
	/// Returns [`SonarError::AlreadyInitialized`] if called more than once,
	/// [`SonarError::InvalidConfig`] for an unrecognized selector, and
	/// [`SonarError::NoBackend`] if instrumentation is requested while no
	/// backend is registered.
	pub fn preinitialize(&self) -> Result<()> {
		let mut state = self.lock();
		if *state != LifecycleState::Uninitialized {
			return Err(SonarError::AlreadyInitialized);
		}

		let config = self.config.clone().unwrap_or_else(Config::from_env);
		let name = match config.mode() {
			Mode::Disabled => {
				info!("Instrumentation disabled");
				*state = LifecycleState::Disabled;
				return Ok(());
			},
			Mode::Enabled(name) => name,
		};

		let backend = self.select(name, &config)?;
		let owns_finalize = lazy_initialize(backend.as_ref())?;
		info!("Instrumentation enabled with the {} backend", backend.name());

		// Publish the backend before the flag the hot path reads
		let _ = self.backend.set(backend);
		self.enabled.store(true, Ordering::Release);
		*state = LifecycleState::Enabled { owns_finalize };
		Ok(())
	}

	fn select(&self, name: Option<&str>, config: &Config) -> Result<Arc<dyn Backend>> {
		let found = match name {
			None => self.backends.first().ok_or(SonarError::NoBackend)?,
			Some(name) => self
				.backends
				.iter()
				.find(|backend| backend.name() == name)
				.ok_or_else(|| SonarError::InvalidConfig {
					name: INSTRUMENT_ENVAR.to_string(),
					value: config.instrument.clone(),
				})?,
		};
		Ok(Arc::clone(found))
	}

	/// Hand the process identity to the backend
	///
	/// A no-op when instrumentation is disabled.
	///
	/// # Errors
	///
	/// Returns [`SonarError::NotInitialized`] before preinitialization and
	/// [`SonarError::Finalized`] after finalization.
	pub fn initialize(&self, rank: i32, size: i32) -> Result<()> {
		let state = self.lock();
		match *state {
			LifecycleState::Uninitialized => Err(SonarError::NotInitialized),
			LifecycleState::Finalized => Err(SonarError::Finalized),
			LifecycleState::Disabled => Ok(()),
			LifecycleState::Enabled { .. } => {
				debug!("Process identity: rank {rank} of {size}");
				if let Some(backend) = self.backend.get() {
					backend.set_process_info(rank, size);
				}
				Ok(())
			},
		}
	}

	/// Stop emitting markers and tear down the backend if owned
	///
	/// Finalizing twice is a no-op.
	///
	/// # Errors
	///
	/// Returns [`SonarError::NotInitialized`] before preinitialization.
	pub fn finalize(&self) -> Result<()> {
		let mut state = self.lock();
		match *state {
			LifecycleState::Uninitialized => return Err(SonarError::NotInitialized),
			LifecycleState::Finalized => {
				debug!("Instrumentation already finalized");
				return Ok(());
			},
			LifecycleState::Disabled => {},
			LifecycleState::Enabled { owns_finalize } => {
				self.enabled.store(false, Ordering::Release);
				if let (true, Some(backend)) = (owns_finalize, self.backend.get()) {
					backend.emit(THREAD_END, backend.clock_now(), &[]);
					backend.flush();
					backend.process_finalize();
				}
			},
		}

		*state = LifecycleState::Finalized;
		info!("Instrumentation finalized");
		Ok(())
	}
}

/// Bring up the backend if nobody did it for the calling thread
///
/// Returns whether the teardown is owned by the caller.
fn lazy_initialize(backend: &dyn Backend) -> Result<bool> {
	if backend.thread_is_ready() {
		debug!("Backend {} already set up for this thread", backend.name());
		return Ok(false);
	}

	let pid = std::process::id();
	let hostname = gethostname()?;
	let loom = format!("{}.{}", hostname.to_string_lossy(), pid);
	debug!("Setting up backend {} under loom {}", backend.name(), loom);

	backend.process_init(&loom, pid);
	backend.thread_init(gettid().as_raw());
	backend.add_cpu(LAZY_CPU);
	backend.emit(
		THREAD_EXECUTE,
		backend.clock_now(),
		&[Payload::I32(-1), Payload::I32(-1), Payload::U64(0)],
	);
	Ok(true)
}
