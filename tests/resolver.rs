//! Tests for symbol resolution and its memoization

use std::sync::{Arc, Barrier};
use std::thread;

use sonar_rs::SonarError;
use sonar_rs::symbol::{Address, CachedAddress, MapProvider, NextSymbolProvider, SymbolResolver};

extern "C" fn answer() -> i32 {
	42
}

extern "C" fn other() -> i32 {
	7
}

#[test]
fn resolves_once_under_contention() {
	const THREADS: usize = 8;

	let provider = Arc::new(MapProvider::new().with("answer", answer as usize));
	let resolver = Arc::new(SymbolResolver::new(Box::new(Arc::clone(&provider))));
	let barrier = Arc::new(Barrier::new(THREADS));

	let handles: Vec<_> = (0..THREADS)
		.map(|_| {
			let resolver = Arc::clone(&resolver);
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				resolver.resolve("answer").unwrap()
			})
		})
		.collect();

	let addresses: Vec<Address> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

	assert!(addresses.iter().all(|address| *address == addresses[0]));
	assert_eq!(addresses[0].as_ptr() as usize, answer as usize);
	assert_eq!(provider.lookups(), 1);

	let real: extern "C" fn() -> i32 = unsafe { addresses[0].cast() };
	assert_eq!(real(), 42);
}

#[test]
fn warm_lookups_skip_the_provider() {
	let provider = Arc::new(
		MapProvider::new()
			.with("answer", answer as usize)
			.with("other", other as usize),
	);
	let resolver = SymbolResolver::new(Box::new(Arc::clone(&provider)));

	assert!(!resolver.is_resolved("answer"));
	for _ in 0..10 {
		resolver.resolve("answer").unwrap();
	}
	resolver.resolve("other").unwrap();

	assert!(resolver.is_resolved("answer"));
	assert_eq!(resolver.resolved_count(), 2);
	assert_eq!(provider.lookups(), 2);
}

#[test]
fn cached_address_belongs_to_its_resolver() {
	let cached = CachedAddress::new();
	let first_provider = Arc::new(MapProvider::new().with("answer", answer as usize));
	let first = SymbolResolver::new(Box::new(Arc::clone(&first_provider)));
	let second = SymbolResolver::new(Box::new(MapProvider::new().with("answer", other as usize)));

	for _ in 0..10 {
		let addr = first.resolve_cached("answer", &cached).unwrap();
		assert_eq!(addr.as_ptr() as usize, answer as usize);
	}
	assert_eq!(first_provider.lookups(), 1);

	// A different resolver never sees the address remembered by the first
	let addr = second.resolve_cached("answer", &cached).unwrap();
	assert_eq!(addr.as_ptr() as usize, other as usize);
	let addr = first.resolve_cached("answer", &cached).unwrap();
	assert_eq!(addr.as_ptr() as usize, answer as usize);
}

#[test]
fn failed_lookup_leaves_the_cached_address_empty() {
	let cached = CachedAddress::new();
	let provider = Arc::new(MapProvider::new());
	let resolver = SymbolResolver::new(Box::new(Arc::clone(&provider)));

	assert!(resolver.resolve_cached("MPI_Missing", &cached).is_err());
	assert!(resolver.resolve_cached("MPI_Missing", &cached).is_err());
	assert_eq!(provider.lookups(), 2);
}

#[test]
fn missing_symbol_is_reported() {
	let provider = Arc::new(MapProvider::new());
	let resolver = SymbolResolver::new(Box::new(Arc::clone(&provider)));

	let err = resolver.resolve("MPI_Missing").unwrap_err();
	assert!(matches!(&err, SonarError::SymbolNotFound(name) if name == "MPI_Missing"));
	assert_eq!(err.to_string(), "Could not find symbol MPI_Missing");

	// Failures are not memoized
	assert!(resolver.resolve("MPI_Missing").is_err());
	assert_eq!(provider.lookups(), 2);
	assert_eq!(resolver.resolved_count(), 0);
}

#[test]
fn nul_in_name_is_rejected() {
	let resolver = SymbolResolver::new(Box::new(MapProvider::new()));
	assert!(matches!(
		resolver.resolve("bad\0name"),
		Err(SonarError::InvalidSymbolName(_))
	));
}

#[test]
fn next_provider_finds_libc() {
	let resolver = SymbolResolver::new(Box::new(NextSymbolProvider::new()));

	let getpid: unsafe extern "C" fn() -> libc::pid_t = unsafe { resolver.resolve("getpid").unwrap().cast() };
	assert_eq!(unsafe { getpid() } as u32, std::process::id());
}
