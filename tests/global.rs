//! Tests for the process-wide runtime
//!
//! Kept in a single test since the runtime can only be installed once per
//! process.

use std::sync::Arc;

use sonar_rs::backend::Recorder;
use sonar_rs::runtime::get_active_runtime;
use sonar_rs::symbol::MapProvider;
use sonar_rs::{Config, SonarError};

#[test]
fn installed_runtime_is_used_by_every_wrapper() {
	assert!(get_active_runtime().is_none());

	let recorder = Arc::new(Recorder::new());
	let runtime = sonar_rs::builder()
		.config(Config::new("recorder"))
		.symbol_provider(MapProvider::new())
		.without_default_backends()
		.backend(Arc::clone(&recorder))
		.build()
		.unwrap();

	let installed = sonar_rs::install(runtime).unwrap();
	assert!(std::ptr::eq(installed, sonar_rs::runtime()));
	assert!(std::ptr::eq(installed, get_active_runtime().unwrap()));

	let second = sonar_rs::builder().build().unwrap();
	assert!(matches!(sonar_rs::install(second), Err(SonarError::AlreadyInitialized)));

	installed.preinitialize().unwrap();
	assert!(sonar_rs::runtime().is_enabled());
	assert_eq!(installed.lifecycle().backend_names().collect::<Vec<_>>(), ["recorder"]);
}
