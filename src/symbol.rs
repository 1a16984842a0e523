//! Symbol resolution
//!
//! Wrappers export the same names as the functions they intercept, so the
//! real implementation has to be looked up "after" the interposing module
//! in the dynamic linker search order. The lookup itself is delegated to a
//! [`SymbolProvider`]; [`SymbolResolver`] memoizes the result per name for
//! the lifetime of the process.

use std::collections::HashMap;
use std::ffi::{CStr, CString, c_void};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{Result, SonarError};

/// Address of a resolved function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(NonNull<c_void>);

// SAFETY: an address is an immutable code location, shared freely
unsafe impl Send for Address {}
unsafe impl Sync for Address {}

impl Address {
	#[must_use]
	pub const fn new(ptr: NonNull<c_void>) -> Self {
		Self(ptr)
	}

	#[must_use]
	pub const fn as_ptr(self) -> *mut c_void {
		self.0.as_ptr()
	}

	/// Reinterpret the address as a function pointer of type `F`
	///
	/// # Safety
	///
	/// `F` must be a function pointer type matching the exact signature and
	/// calling convention of the function living at this address.
	///
	/// # Panics
	///
	/// Panics if `F` is not pointer sized.
	#[must_use]
	pub unsafe fn cast<F: Copy>(self) -> F {
		assert_eq!(
			std::mem::size_of::<F>(),
			std::mem::size_of::<*mut c_void>(),
			"resolved symbols can only be cast to function pointers"
		);
		let ptr = self.as_ptr();
		unsafe { std::mem::transmute_copy::<*mut c_void, F>(&ptr) }
	}
}

/// Trait for looking up symbols in loaded modules
pub trait SymbolProvider: Send + Sync {
	/// Look up `name`, returning its address if some module defines it
	fn lookup(&self, name: &CStr) -> Option<NonNull<c_void>>;

	/// Get the name of the provider
	///
	/// This is used for debugging and logging purposes.
	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

impl<P: SymbolProvider + ?Sized> SymbolProvider for Arc<P> {
	fn lookup(&self, name: &CStr) -> Option<NonNull<c_void>> {
		(**self).lookup(name)
	}

	fn name(&self) -> &'static str {
		(**self).name()
	}
}

/// Provider finding the next definition after the current module
///
/// Uses `dlsym(RTLD_NEXT, ...)`, so the interposing library must not be
/// the last module defining the symbol.
#[derive(Debug, Default, Clone, Copy)]
pub struct NextSymbolProvider;

impl NextSymbolProvider {
	#[must_use]
	pub const fn new() -> Self {
		Self
	}
}

impl SymbolProvider for NextSymbolProvider {
	fn lookup(&self, name: &CStr) -> Option<NonNull<c_void>> {
		NonNull::new(unsafe { libc::dlsym(libc::RTLD_NEXT, name.as_ptr()) })
	}

	fn name(&self) -> &'static str {
		"NextSymbolProvider"
	}
}

/// In-memory provider mapping names to fixed addresses
///
/// Counts every lookup it serves, which makes it suitable for checking
/// memoization.
#[derive(Debug, Default)]
pub struct MapProvider {
	symbols: HashMap<String, usize>,
	lookups: AtomicUsize,
}

impl MapProvider {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a symbol, builder style
	#[must_use]
	pub fn with(mut self, name: impl Into<String>, addr: usize) -> Self {
		self.insert(name, addr);
		self
	}

	/// Add a symbol
	pub fn insert(&mut self, name: impl Into<String>, addr: usize) {
		self.symbols.insert(name.into(), addr);
	}

	/// Number of lookups served so far, successful or not
	#[must_use]
	pub fn lookups(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}
}

impl SymbolProvider for MapProvider {
	fn lookup(&self, name: &CStr) -> Option<NonNull<c_void>> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		let name = name.to_str().ok()?;
		let addr = *self.symbols.get(name)?;
		NonNull::new(addr as *mut c_void)
	}

	fn name(&self) -> &'static str {
		"MapProvider"
	}
}

type Slot = Arc<OnceCell<Address>>;

// Source of resolver identities
static NEXT_RESOLVER_ID: AtomicU64 = AtomicU64::new(0);

/// Address remembered next to a single wrapper
///
/// Filled by the first resolver that resolves through it. Later calls from
/// that same resolver read it without touching the shared cache; other
/// resolvers fall back to their own lookup.
#[derive(Debug, Default)]
pub struct CachedAddress(OnceCell<(u64, Address)>);

impl CachedAddress {
	#[must_use]
	pub const fn new() -> Self {
		Self(OnceCell::new())
	}

	/// Address stored by the resolver `owner`, if any
	fn get(&self, owner: u64) -> Option<Address> {
		match self.0.get() {
			Some((id, addr)) if *id == owner => Some(*addr),
			_ => None,
		}
	}
}

/// Memoizing resolver of wrapped symbols
///
/// Each distinct name is looked up at most once successfully, even when
/// many threads request it concurrently for the first time; every caller
/// observes the same address.
pub struct SymbolResolver {
	id: u64,
	provider: Box<dyn SymbolProvider>,
	cache: RwLock<HashMap<&'static str, Slot>>,
}

impl std::fmt::Debug for SymbolResolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SymbolResolver")
			.field("provider", &self.provider.name())
			.field("cached", &self.resolved_count())
			.finish()
	}
}

impl SymbolResolver {
	/// Create a resolver over `provider`
	#[must_use]
	pub fn new(provider: Box<dyn SymbolProvider>) -> Self {
		Self {
			id: NEXT_RESOLVER_ID.fetch_add(1, Ordering::Relaxed),
			provider,
			cache: RwLock::new(HashMap::new()),
		}
	}

	/// Resolve `name`, looking it up on first use only
	///
	/// # Errors
	///
	/// Returns [`SonarError::SymbolNotFound`] if the provider has no
	/// definition for `name`, or [`SonarError::InvalidSymbolName`] if the
	/// name contains a NUL byte.
	pub fn resolve(&self, name: &'static str) -> Result<Address> {
		// Fast path once the symbol is warm
		{
			let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
			if let Some(addr) = cache.get(name).and_then(|slot| slot.get()) {
				return Ok(*addr);
			}
		}

		let slot = self.slot(name);
		slot.get_or_try_init(|| self.lookup(name)).copied()
	}

	/// Resolve `name`, remembering the address in `cached`
	///
	/// Once `cached` holds an address from this resolver, the call is a
	/// single atomic load.
	///
	/// # Errors
	///
	/// See [`SymbolResolver::resolve`].
	pub fn resolve_cached(&self, name: &'static str, cached: &CachedAddress) -> Result<Address> {
		if let Some(addr) = cached.get(self.id) {
			return Ok(addr);
		}

		let addr = self.resolve(name)?;
		let _ = cached.0.set((self.id, addr));
		Ok(addr)
	}

	/// Whether `name` has already been resolved
	#[must_use]
	pub fn is_resolved(&self, name: &str) -> bool {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.get(name).is_some_and(|slot| slot.get().is_some())
	}

	/// Number of names resolved so far
	#[must_use]
	pub fn resolved_count(&self) -> usize {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.values().filter(|slot| slot.get().is_some()).count()
	}

	/// Get the cell for `name`, inserting an empty one on first request
	fn slot(&self, name: &'static str) -> Slot {
		let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(cache.entry(name).or_default())
	}

	fn lookup(&self, name: &'static str) -> Result<Address> {
		let cname = CString::new(name).map_err(|_| SonarError::InvalidSymbolName(name.to_string()))?;

		match self.provider.lookup(&cname) {
			Some(ptr) => {
				debug!("Resolved symbol {} at {:p} via {}", name, ptr, self.provider.name());
				Ok(Address::new(ptr))
			},
			None => Err(SonarError::SymbolNotFound(name.to_string())),
		}
	}
}
