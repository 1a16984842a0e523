//! Typed environment variables

use std::fmt::Display;
use std::str::FromStr;

/// An environment variable read once and parsed into `T`
///
/// When the variable is defined but blank or cannot be parsed, a warning
/// is reported and the default value is kept.
#[derive(Debug, Clone)]
pub struct Envar<T> {
	value: T,
	present: bool,
	name: String,
}

impl<T> Envar<T>
where
	T: FromStr + Display,
{
	/// Read the variable `name`, falling back to `default`
	pub fn new(name: impl Into<String>, default: T) -> Self {
		let name = name.into();
		let raw = std::env::var(&name).ok();
		Self::from_raw(name, raw.as_deref(), default)
	}

	/// Build the variable from an already fetched raw value
	pub fn from_raw(name: impl Into<String>, raw: Option<&str>, default: T) -> Self {
		let name = name.into();

		let Some(raw) = raw else {
			return Self {
				value: default,
				present: false,
				name,
			};
		};

		// Blank values never parse
		let parsed = match raw.trim() {
			"" => None,
			raw => raw.parse::<T>().ok(),
		};

		match parsed {
			Some(value) => Self {
				value,
				present: true,
				name,
			},
			None => {
				crate::warning!("Invalid value for {name}; defaulting to {default}");
				Self {
					value: default,
					present: false,
					name,
				}
			},
		}
	}
}

impl<T> Envar<T> {
	/// Whether the variable was defined with a valid value
	#[must_use]
	pub const fn is_present(&self) -> bool {
		self.present
	}

	/// Name of the variable
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Current value
	#[must_use]
	pub const fn get(&self) -> &T {
		&self.value
	}

	/// Consume the variable, returning its value
	#[must_use]
	pub fn into_inner(self) -> T {
		self.value
	}
}
