//! Tests for what reaches the error stream: fatal reports, concurrent
//! warnings and quiet finalization
//!
//! Each scenario runs in a fresh copy of this test binary, selected through
//! `SONAR_TEST_SCENARIO`, so that terminating the process or writing to the
//! error stream does not disturb the test harness.

use std::ffi::c_int;
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, Output};
use std::thread;

use sonar_rs::symbol::MapProvider;
use sonar_rs::util::diag::raw;
use sonar_rs::{Binding, CallSite, Config, Flavor, Operation, Runtime};

const SCENARIO: &str = "SONAR_TEST_SCENARIO";

const WARNING_THREADS: usize = 8;
const WARNINGS_PER_THREAD: usize = 50;

static FINALIZE: CallSite = CallSite::new("MPI_Finalize", Operation::Finalize, Binding::C, Flavor::Regular);

extern "C" fn fake_finalize() -> c_int {
	3
}

fn long_message() -> String {
	"x".repeat(4096)
}

/// Run `test` alone in a child process with `scenario` selected
fn run_scenario(test: &str, scenario: &str) -> Output {
	let exe = std::env::current_exe().unwrap();
	Command::new(exe)
		.args([test, "--exact", "--nocapture", "--test-threads=1"])
		.env(SCENARIO, scenario)
		.output()
		.unwrap()
}

fn scenario_is(name: &str) -> bool {
	std::env::var(SCENARIO).is_ok_and(|value| value == name)
}

fn assert_terminated(output: &Output) {
	if cfg!(debug_assertions) {
		assert_eq!(output.status.signal(), Some(libc::SIGABRT), "{output:?}");
	} else {
		assert_eq!(output.status.code(), Some(1), "{output:?}");
	}
}

#[test]
fn scenario_fatal() {
	if scenario_is("fatal") {
		sonar_rs::fatal!("Could not find symbol {}", "MPI_Send");
	}
}

#[test]
fn scenario_raw_fatal() {
	if scenario_is("raw-fatal") {
		raw::fail(&[&"Marker ", &"MS[", &" is repeated"]);
	}
}

#[test]
fn scenario_fail_if() {
	if scenario_is("fail-if") {
		sonar_rs::util::diag::fail_if(true, format_args!("Could not retrieve the MPI rank"));
	}
}

#[test]
fn scenario_concurrent_warnings() {
	if !scenario_is("warnings") {
		return;
	}

	let handles: Vec<_> = (0..WARNING_THREADS)
		.map(|id| {
			thread::spawn(move || {
				let message = long_message();
				for _ in 0..WARNINGS_PER_THREAD {
					sonar_rs::warning!("thread {id} {message}");
				}
			})
		})
		.collect();

	for handle in handles {
		handle.join().unwrap();
	}
}

#[test]
fn scenario_finalize_uninitialized() {
	if !scenario_is("finalize-uninitialized") {
		return;
	}

	let runtime = Runtime::builder()
		.config(Config::new("off"))
		.symbol_provider(MapProvider::new().with("MPI_Finalize", fake_finalize as usize))
		.without_default_backends()
		.build()
		.unwrap();

	let result = unsafe { runtime.process_finalize(&FINALIZE, |real: unsafe extern "C" fn() -> c_int| real()) };
	assert_eq!(result, 3);
}

#[test]
fn fatal_error_is_reported_before_terminating() {
	let output = run_scenario("scenario_fatal", "fatal");

	assert_terminated(&output);
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Error: Could not find symbol MPI_Send\n"), "{stderr}");
	// Nothing after the fatal report
	assert!(!String::from_utf8_lossy(&output.stdout).contains("test result"));
}

#[test]
fn raw_fatal_error_terminates() {
	let output = run_scenario("scenario_raw_fatal", "raw-fatal");

	assert_terminated(&output);
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Error: Marker MS[ is repeated\n"), "{stderr}");
}

#[test]
fn conditional_failure_terminates() {
	let output = run_scenario("scenario_fail_if", "fail-if");

	assert_terminated(&output);
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Error: Could not retrieve the MPI rank\n"), "{stderr}");
}

#[test]
fn concurrent_warnings_never_interleave() {
	let output = run_scenario("scenario_concurrent_warnings", "warnings");
	assert!(output.status.success(), "{output:?}");

	let message = long_message();
	let stderr = String::from_utf8_lossy(&output.stderr);
	let warnings: Vec<_> = stderr.lines().filter(|line| line.contains("Warning: ")).collect();

	assert_eq!(warnings.len(), WARNING_THREADS * WARNINGS_PER_THREAD);
	for line in warnings {
		let rest = line.strip_prefix("Warning: thread ").unwrap();
		let (id, text) = rest.split_once(' ').unwrap();
		assert!(id.parse::<usize>().unwrap() < WARNING_THREADS);
		assert_eq!(text, message);
	}
}

#[test]
fn finalize_without_initialization_is_silent() {
	let output = run_scenario("scenario_finalize_uninitialized", "finalize-uninitialized");
	assert!(output.status.success(), "{output:?}");

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(!stderr.contains("Warning: "), "{stderr}");
}
