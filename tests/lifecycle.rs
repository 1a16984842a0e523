//! Tests for the instrumentation lifecycle

use std::ffi::c_int;
use std::sync::Arc;

use sonar_rs::backend::{Payload, Record, Recorder};
use sonar_rs::registry::{MarkerPair, OperationTable};
use sonar_rs::runtime::{INSTRUMENT_ENVAR, LifecycleState};
use sonar_rs::symbol::MapProvider;
use sonar_rs::{Binding, CallSite, Config, Flavor, Operation, Runtime, SonarError};

type Entry = unsafe extern "C" fn() -> c_int;

extern "C" fn fake_init() -> c_int {
	0
}

extern "C" fn fake_finalize() -> c_int {
	0
}

static INIT: CallSite = CallSite::new("MPI_Init", Operation::Init, Binding::C, Flavor::Regular);
static FINALIZE: CallSite = CallSite::new("MPI_Finalize", Operation::Finalize, Binding::C, Flavor::Regular);
static BARRIER: CallSite = CallSite::new("MPI_Barrier", Operation::Barrier, Binding::C, Flavor::Regular);

fn builder(instrument: &str) -> sonar_rs::RuntimeBuilder {
	Runtime::builder()
		.config(Config::new(instrument))
		.symbol_provider(
			MapProvider::new()
				.with("MPI_Init", fake_init as usize)
				.with("MPI_Finalize", fake_finalize as usize)
				.with("MPI_Barrier", fake_init as usize),
		)
		.without_default_backends()
}

fn runtime_with(instrument: &str, recorder: &Arc<Recorder>) -> Runtime {
	builder(instrument).backend(Arc::clone(recorder)).build().unwrap()
}

fn init(runtime: &Runtime, rank: i32, size: i32) -> c_int {
	unsafe { runtime.process_init(&INIT, |real: Entry| real(), |_| Ok((rank, size))) }
}

fn finalize(runtime: &Runtime) -> c_int {
	unsafe { runtime.process_finalize(&FINALIZE, |real: Entry| real()) }
}

fn event(record: &Record) -> Option<(&'static str, &[Payload])> {
	match record {
		Record::Event { marker, payload, .. } => Some((marker.as_str(), payload.as_slice())),
		_ => None,
	}
}

#[test]
fn lazy_initialization_brings_up_the_backend() {
	let recorder = Arc::new(Recorder::new());
	let runtime = runtime_with("recorder", &recorder);

	assert_eq!(init(&runtime, 3, 8), 0);
	assert_eq!(runtime.lifecycle().state(), LifecycleState::Enabled { owns_finalize: true });

	let records = recorder.records();
	assert_eq!(records.len(), 7, "{records:#?}");

	let Record::ProcessInit { loom, pid } = &records[0] else {
		panic!("expected process init, got {:?}", records[0]);
	};
	assert_eq!(*pid, std::process::id());
	assert!(loom.ends_with(&format!(".{pid}")));
	assert!(loom.len() > format!(".{pid}").len());

	assert!(matches!(records[1], Record::ThreadInit { .. }));
	assert_eq!(records[2], Record::AddCpu { index: 0 });
	assert_eq!(
		event(&records[3]),
		Some(("OHx", &[Payload::I32(-1), Payload::I32(-1), Payload::U64(0)][..]))
	);
	assert_eq!(event(&records[4]).map(|(marker, _)| marker), Some("MUi"));
	assert_eq!(event(&records[5]).map(|(marker, _)| marker), Some("MUI"));
	assert_eq!(records[6], Record::ProcessInfo { rank: 3, size: 8 });
}

#[test]
fn owned_finalization_tears_down_the_backend() {
	let recorder = Arc::new(Recorder::new());
	let runtime = runtime_with("recorder", &recorder);

	init(&runtime, 0, 1);
	recorder.clear();

	assert_eq!(finalize(&runtime), 0);

	let records = recorder.records();
	assert_eq!(records.len(), 5, "{records:#?}");
	assert_eq!(event(&records[0]).map(|(marker, _)| marker), Some("MUf"));
	assert_eq!(event(&records[1]).map(|(marker, _)| marker), Some("MUF"));
	assert_eq!(event(&records[2]).map(|(marker, _)| marker), Some("OHe"));
	assert_eq!(records[3], Record::Flush);
	assert_eq!(records[4], Record::ProcessFinalize);

	assert_eq!(runtime.lifecycle().state(), LifecycleState::Finalized);
	assert!(!runtime.is_enabled());
}

#[test]
fn borrowed_backend_is_left_running() {
	let recorder = Arc::new(Recorder::initialized());
	let runtime = runtime_with("recorder", &recorder);

	init(&runtime, 1, 2);
	assert_eq!(runtime.lifecycle().state(), LifecycleState::Enabled { owns_finalize: false });
	assert_eq!(recorder.markers(), ["MUi", "MUI"]);
	assert_eq!(recorder.records()[2], Record::ProcessInfo { rank: 1, size: 2 });

	recorder.clear();
	finalize(&runtime);
	assert_eq!(recorder.records().len(), 2);
	assert_eq!(recorder.markers(), ["MUf", "MUF"]);
}

#[test]
fn finalization_is_idempotent() {
	let recorder = Arc::new(Recorder::new());
	let runtime = runtime_with("recorder", &recorder);

	init(&runtime, 0, 1);
	runtime.finalize().unwrap();
	let after_first = recorder.records().len();

	runtime.finalize().unwrap();
	assert_eq!(recorder.records().len(), after_first);

	// Calls after finalization are forwarded without markers
	let result = unsafe { runtime.process(&BARRIER, |real: Entry| real()) };
	assert_eq!(result, 0);
	assert_eq!(recorder.records().len(), after_first);

	assert!(matches!(runtime.initialize(0, 1), Err(SonarError::Finalized)));
}

#[test]
fn disabled_instrumentation_never_touches_the_backend() {
	let recorder = Arc::new(Recorder::new());
	let runtime = runtime_with("none", &recorder);

	let mut queried = false;
	let result = unsafe {
		runtime.process_init(
			&INIT,
			|real: Entry| real(),
			|_| {
				queried = true;
				Ok((0, 1))
			},
		)
	};

	assert_eq!(result, 0);
	assert!(!queried);
	assert_eq!(runtime.lifecycle().state(), LifecycleState::Disabled);

	finalize(&runtime);
	assert_eq!(runtime.lifecycle().state(), LifecycleState::Finalized);
	assert!(recorder.records().is_empty());
}

#[test]
fn off_is_an_alias_of_none() {
	let recorder = Arc::new(Recorder::new());
	let runtime = runtime_with("off", &recorder);

	runtime.preinitialize().unwrap();
	assert_eq!(runtime.lifecycle().state(), LifecycleState::Disabled);
}

#[test]
fn on_selects_the_preferred_backend() {
	let first = Arc::new(Recorder::named("first"));
	let second = Arc::new(Recorder::named("second"));
	let runtime = builder("on")
		.backend(Arc::clone(&first))
		.backend(Arc::clone(&second))
		.build()
		.unwrap();

	init(&runtime, 0, 1);
	assert!(!first.records().is_empty());
	assert!(second.records().is_empty());
}

#[test]
fn backend_is_selected_by_name() {
	let first = Arc::new(Recorder::named("first"));
	let second = Arc::new(Recorder::named("second"));
	let runtime = builder("second")
		.backend(Arc::clone(&first))
		.backend(Arc::clone(&second))
		.build()
		.unwrap();

	runtime.preinitialize().unwrap();
	assert!(first.records().is_empty());
	assert!(!second.records().is_empty());
	assert_eq!(runtime.lifecycle().active_backend().map(|backend| backend.name()), Some("second"));
}

#[test]
fn default_backends_include_trace() {
	let runtime = Runtime::builder()
		.config(Config::new("trace"))
		.symbol_provider(MapProvider::new())
		.build()
		.unwrap();

	assert!(runtime.lifecycle().backend_names().any(|name| name == "trace"));
	runtime.preinitialize().unwrap();
	assert!(runtime.is_enabled());
}

#[test]
fn unknown_selector_is_rejected() {
	let recorder = Arc::new(Recorder::new());
	let runtime = runtime_with("bogus", &recorder);

	let err = runtime.preinitialize().unwrap_err();
	match &err {
		SonarError::InvalidConfig { name, value } => {
			assert_eq!(name, INSTRUMENT_ENVAR);
			assert_eq!(value, "bogus");
		},
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(err.to_string(), "Invalid value bogus for SONAR_MPI_INSTRUMENT");
	assert_eq!(runtime.lifecycle().state(), LifecycleState::Uninitialized);
	assert!(recorder.records().is_empty());
}

#[test]
fn enabling_without_backends_fails() {
	let runtime = builder("on").build().unwrap();
	assert!(matches!(runtime.preinitialize(), Err(SonarError::NoBackend)));
}

#[test]
fn preinitialization_happens_once() {
	let recorder = Arc::new(Recorder::new());
	let runtime = runtime_with("recorder", &recorder);

	runtime.preinitialize().unwrap();
	let records = recorder.records().len();

	assert!(matches!(runtime.preinitialize(), Err(SonarError::AlreadyInitialized)));
	assert_eq!(recorder.records().len(), records);
}

#[test]
fn lifecycle_calls_require_preinitialization() {
	let recorder = Arc::new(Recorder::new());
	let runtime = runtime_with("recorder", &recorder);

	assert!(matches!(runtime.initialize(0, 1), Err(SonarError::NotInitialized)));
	assert!(matches!(runtime.finalize(), Err(SonarError::NotInitialized)));
}

#[test]
fn duplicate_backend_names_are_rejected() {
	let err = builder("on")
		.backend(Arc::new(Recorder::named("dup")))
		.backend(Arc::new(Recorder::named("dup")))
		.build()
		.unwrap_err();
	assert!(matches!(err, SonarError::DuplicateBackend(ref name) if name == "dup"));
}

#[test]
fn inconsistent_marker_table_blocks_preinitialization() {
	let mut table = Operation::TABLE.to_vec();
	table[Operation::Barrier.index()] = MarkerPair::new("MS[", "MCB");
	let table: &'static [MarkerPair] = Box::leak(table.into_boxed_slice());

	let recorder = Arc::new(Recorder::new());
	let runtime = builder("recorder")
		.backend(Arc::clone(&recorder))
		.marker_table(table)
		.build()
		.unwrap();

	assert!(matches!(runtime.preinitialize(), Err(SonarError::RepeatedMarker("MS["))));
	assert!(recorder.records().is_empty());
}

#[test]
fn marker_table_must_match_the_operations() {
	static SHORT: [MarkerPair; 1] = [MarkerPair::new("MS[", "MS]")];

	let err = builder("none").marker_table(&SHORT).build().unwrap_err();
	assert!(matches!(err, SonarError::TableSize { found: 1, .. }));
}
