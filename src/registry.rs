//! Operation registry
//!
//! A read-only table, indexed by operation, of the marker pairs emitted
//! when entering and exiting each operation. Markers follow the
//! model-category-value format: three ASCII characters.
//!
//! Alias entries deliberately reuse the markers of an earlier entry so
//! that variants of an operation (vector or large-count forms) share a
//! single trace category. [`validate`] checks the whole table once at
//! startup: non-alias markers must be unique, and alias markers must refer
//! to markers registered by a preceding non-alias entry.

use std::collections::HashSet;

use crate::error::{Result, SonarError};

/// Length of a well-formed marker
pub const MARKER_LEN: usize = 3;

/// A short trace event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(&'static str);

impl Marker {
	#[must_use]
	pub const fn new(mcv: &'static str) -> Self {
		Self(mcv)
	}

	#[must_use]
	pub const fn as_str(self) -> &'static str {
		self.0
	}

	#[must_use]
	pub const fn as_bytes(self) -> &'static [u8] {
		self.0.as_bytes()
	}

	/// Whether the marker is exactly three ASCII characters
	#[must_use]
	pub fn is_well_formed(self) -> bool {
		self.0.len() == MARKER_LEN && self.0.is_ascii()
	}
}

impl std::fmt::Display for Marker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.0)
	}
}

/// Enter and exit markers of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
	/// Marker emitted before the real call
	pub enter: Marker,
	/// Marker emitted after the real call
	pub exit: Marker,
	/// Whether this entry reuses the markers of another entry
	pub alias: bool,
}

impl MarkerPair {
	/// A canonical entry owning its markers
	#[must_use]
	pub const fn new(enter: &'static str, exit: &'static str) -> Self {
		Self {
			enter: Marker::new(enter),
			exit: Marker::new(exit),
			alias: false,
		}
	}

	/// An entry reusing the markers of an earlier canonical entry
	#[must_use]
	pub const fn alias(enter: &'static str, exit: &'static str) -> Self {
		Self {
			enter: Marker::new(enter),
			exit: Marker::new(exit),
			alias: true,
		}
	}
}

/// A closed, densely numbered set of operations with their markers
///
/// Implemented through `#[derive(OperationTable)]`.
pub trait OperationTable: Copy + 'static {
	/// Marker pairs, one per operation, in discriminant order
	const TABLE: &'static [MarkerPair];

	/// Dense index of the operation into [`Self::TABLE`]
	fn index(self) -> usize;

	/// Name of the operation
	fn name(self) -> &'static str;

	/// Markers of the operation in the built-in table
	fn markers(self) -> &'static MarkerPair {
		&Self::TABLE[self.index()]
	}
}

/// Check a marker table for collisions and dangling aliases
///
/// # Errors
///
/// Returns the first violation found while walking the table in order:
/// a malformed marker, a repeated non-alias marker, or an alias marker
/// that no preceding non-alias entry registered.
pub fn validate(table: &[MarkerPair]) -> Result<()> {
	let mut existing: HashSet<Marker> = HashSet::with_capacity(table.len() * 2);

	for pair in table {
		for marker in [pair.enter, pair.exit] {
			if !marker.is_well_formed() {
				return Err(SonarError::MalformedMarker(marker.as_str()));
			}

			if pair.alias {
				if !existing.contains(&marker) {
					return Err(SonarError::MissingAliasTarget(marker.as_str()));
				}
			} else if !existing.insert(marker) {
				return Err(SonarError::RepeatedMarker(marker.as_str()));
			}
		}
	}

	Ok(())
}

/// A validated view of a marker table
#[derive(Debug, Clone, Copy)]
pub struct Registry {
	table: &'static [MarkerPair],
}

impl Registry {
	/// Wrap `table`, which must hold exactly one entry per operation of `O`
	///
	/// The table is only checked for size here; [`Registry::validate`] runs
	/// the full correctness pass.
	///
	/// # Errors
	///
	/// Returns [`SonarError::TableSize`] when the table does not match `O`.
	pub fn new<O: OperationTable>(table: &'static [MarkerPair]) -> Result<Self> {
		if table.len() != O::TABLE.len() {
			return Err(SonarError::TableSize {
				expected: O::TABLE.len(),
				found: table.len(),
			});
		}
		Ok(Self { table })
	}

	/// Registry over the built-in table of `O`
	#[must_use]
	pub const fn builtin<O: OperationTable>() -> Self {
		Self { table: O::TABLE }
	}

	/// Run the correctness pass over the table
	///
	/// # Errors
	///
	/// See [`validate`].
	pub fn validate(&self) -> Result<()> {
		validate(self.table)
	}

	/// Markers of `operation`
	#[must_use]
	pub fn markers<O: OperationTable>(&self, operation: O) -> &'static MarkerPair {
		&self.table[operation.index()]
	}

	#[must_use]
	pub const fn len(&self) -> usize {
		self.table.len()
	}

	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.table.is_empty()
	}
}
