//! Operation table generation
//!
//! This module turns an annotated fieldless enum into a densely indexed
//! table of marker pairs.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::ParseStream;
use syn::{Data, DeriveInput, Error, Fields, Ident, LitStr, Token, Variant};

/// Length of a marker: model, category and value
const MARKER_LEN: usize = 3;

/// Markers declared on a single variant
struct VariantMarkers {
	enter: LitStr,
	exit: LitStr,
	alias: bool,
}

/// Generate the table and helper methods for the annotated enum
pub fn generate_operation_table(input: &DeriveInput) -> Result<TokenStream, Error> {
	let name = &input.ident;

	let Data::Enum(data) = &input.data else {
		return Err(Error::new_spanned(input, "OperationTable can only be derived for enums"));
	};

	let mut idents = Vec::with_capacity(data.variants.len());
	let mut pairs = Vec::with_capacity(data.variants.len());

	for variant in &data.variants {
		check_variant_shape(variant)?;
		let markers = parse_variant_markers(variant)?;

		let enter = &markers.enter;
		let exit = &markers.exit;
		pairs.push(if markers.alias {
			quote! { ::sonar_rs::registry::MarkerPair::alias(#enter, #exit) }
		} else {
			quote! { ::sonar_rs::registry::MarkerPair::new(#enter, #exit) }
		});
		idents.push(&variant.ident);
	}

	let count = idents.len();
	let names = idents.iter().map(|ident| ident.to_string());

	let output = quote! {
		impl #name {
			/// Number of operations in the table
			pub const COUNT: usize = #count;

			/// Every operation, in table order
			pub const ALL: [Self; #count] = [#(Self::#idents),*];

			/// Dense table index of the operation
			#[must_use]
			pub const fn index(self) -> usize {
				self as usize
			}

			/// Name of the operation
			#[must_use]
			pub const fn name(self) -> &'static str {
				match self {
					#(Self::#idents => #names),*
				}
			}
		}

		impl ::sonar_rs::registry::OperationTable for #name {
			const TABLE: &'static [::sonar_rs::registry::MarkerPair] = &[#(#pairs),*];

			fn index(self) -> usize {
				#name::index(self)
			}

			fn name(self) -> &'static str {
				#name::name(self)
			}
		}
	};

	Ok(output)
}

/// Only unit variants with implicit discriminants can index the table
fn check_variant_shape(variant: &Variant) -> Result<(), Error> {
	if !matches!(variant.fields, Fields::Unit) {
		return Err(Error::new_spanned(variant, "operations must be unit variants"));
	}

	if let Some((_, discriminant)) = &variant.discriminant {
		return Err(Error::new_spanned(
			discriminant,
			"operations must not declare explicit discriminants",
		));
	}

	Ok(())
}

/// Parse `#[markers("ENT", "EXT")]` or `#[markers("ENT", "EXT", alias)]`
fn parse_variant_markers(variant: &Variant) -> Result<VariantMarkers, Error> {
	let mut found = None;

	for attr in &variant.attrs {
		if !attr.path().is_ident("markers") {
			continue;
		}

		if found.is_some() {
			return Err(Error::new_spanned(attr, "duplicate `markers` attribute"));
		}

		found = Some(attr.parse_args_with(|input: ParseStream| {
			let enter: LitStr = input.parse()?;
			input.parse::<Token![,]>()?;
			let exit: LitStr = input.parse()?;

			let mut alias = false;
			if input.peek(Token![,]) {
				input.parse::<Token![,]>()?;
				if !input.is_empty() {
					let flag: Ident = input.parse()?;
					if flag != "alias" {
						return Err(Error::new(flag.span(), "expected `alias`"));
					}
					alias = true;
				}
			}

			Ok(VariantMarkers { enter, exit, alias })
		})?);
	}

	let Some(markers) = found else {
		return Err(Error::new_spanned(
			&variant.ident,
			format!("operation `{}` is missing a `markers` attribute", variant.ident),
		));
	};

	check_marker(&markers.enter)?;
	check_marker(&markers.exit)?;

	Ok(markers)
}

fn check_marker(marker: &LitStr) -> Result<(), Error> {
	let value = marker.value();
	if value.len() != MARKER_LEN || !value.is_ascii() {
		return Err(Error::new_spanned(
			marker,
			format!("marker \"{value}\" must be exactly {MARKER_LEN} ASCII characters"),
		));
	}
	Ok(())
}
