//! Tests for diagnostics reporting, configuration parsing and errors

use std::fs::File;
use std::io::Read;
use std::os::unix::io::FromRawFd;

use sonar_rs::SonarError;
use sonar_rs::runtime::{Config, INSTRUMENT_DEFAULT, INSTRUMENT_ENVAR, Mode};
use sonar_rs::util::Envar;
use sonar_rs::util::diag::raw::{RawPart, RawWriter};
use sonar_rs::util::diag::{self, Severity, format_message};

/// Write a report through a pipe and read it back
fn capture(severity: Severity, parts: &[&dyn RawPart]) -> String {
	let mut fds = [0; 2];
	assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);

	RawWriter::new(fds[1]).report(severity, parts);
	unsafe { libc::close(fds[1]) };

	let mut output = String::new();
	let mut reader = unsafe { File::from_raw_fd(fds[0]) };
	reader.read_to_string(&mut output).unwrap();
	output
}

#[test]
fn messages_carry_a_severity_prefix() {
	assert_eq!(
		format_message(Severity::Error, format_args!("Could not find symbol {}", "MPI_Send")),
		"Error: Could not find symbol MPI_Send\n"
	);
	assert_eq!(
		format_message(Severity::Warning, format_args!("Invalid value {}", 3)),
		"Warning: Invalid value 3\n"
	);
}

#[test]
fn raw_reports_are_formatted_without_allocating() {
	let output = capture(
		Severity::Warning,
		&[&"Marker ", &"MS[", &" at ", &-42i32, &' ', &u64::MAX, &' ', &0u8],
	);
	assert_eq!(output, "Warning: Marker MS[ at -42 18446744073709551615 0\n");

	let output = capture(Severity::Error, &[&i64::MIN, &" ", &c"cstr"]);
	assert_eq!(output, "Error: -9223372036854775808 cstr\n");
}

#[test]
fn non_fatal_reports_return() {
	diag::warn_if(false, format_args!("never printed"));
	diag::fail_if(false, format_args!("never printed"));
	sonar_rs::warning!("diagnostics test warning {}", 1);
}

#[test]
fn envar_parses_trimmed_values() {
	let var = Envar::from_raw("SONAR_TEST_NUMBER", Some(" 42 "), 0u32);
	assert!(var.is_present());
	assert_eq!(*var.get(), 42);
	assert_eq!(var.name(), "SONAR_TEST_NUMBER");
}

#[test]
fn envar_falls_back_to_default() {
	let missing = Envar::from_raw("SONAR_TEST_NUMBER", None, 7u32);
	assert!(!missing.is_present());
	assert_eq!(missing.into_inner(), 7);

	let invalid = Envar::from_raw("SONAR_TEST_NUMBER", Some("seven"), 7u32);
	assert!(!invalid.is_present());
	assert_eq!(invalid.into_inner(), 7);
}

#[test]
fn blank_selector_disables_instrumentation() {
	for raw in ["", "   ", "\n"] {
		let selector = Envar::from_raw(INSTRUMENT_ENVAR, Some(raw), INSTRUMENT_DEFAULT.to_string());
		assert!(!selector.is_present());
		assert_eq!(selector.get(), "none");
		assert_eq!(Config::new(selector.into_inner()).mode(), Mode::Disabled);
	}
}

#[test]
fn instrument_selector_modes() {
	assert_eq!(Config::default().instrument, INSTRUMENT_DEFAULT);
	assert_eq!(Config::default().mode(), Mode::Disabled);
	assert_eq!(Config::new("off").mode(), Mode::Disabled);
	assert_eq!(Config::new("none").mode(), Mode::Disabled);
	assert_eq!(Config::new("on").mode(), Mode::Enabled(None));
	assert_eq!(Config::new("ovni").mode(), Mode::Enabled(Some("ovni")));

	let selector = Envar::from_raw(INSTRUMENT_ENVAR, Some("  on\n"), INSTRUMENT_DEFAULT.to_string());
	assert_eq!(Config::new(selector.into_inner()).mode(), Mode::Enabled(None));
}

#[test]
fn error_messages() {
	let err = SonarError::InvalidConfig {
		name: INSTRUMENT_ENVAR.to_string(),
		value: "maybe".to_string(),
	};
	assert_eq!(err.to_string(), "Invalid value maybe for SONAR_MPI_INSTRUMENT");
	assert_eq!(SonarError::RepeatedMarker("MS[").to_string(), "Marker MS[ is repeated");
	assert_eq!(
		SonarError::MissingAliasTarget("MAg").to_string(),
		"Marker MAg is alias but not present"
	);
	assert_eq!(SonarError::from("custom").to_string(), "custom");
}
