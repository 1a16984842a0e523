//! Implementation of the `interpose!` procedural macro
//!
//! The macro reads a table of API signatures and emits, for each of them,
//! an exported function with the exact external name and signature whose
//! body does nothing but forward its arguments through the dispatcher.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Error, Ident, LitStr, Path, ReturnType, Token, Type, parenthesized};

/// A whole `interpose!` invocation
pub struct WrapperTable {
	/// Function returning the runtime to dispatch through
	runtime: Option<Path>,
	/// Binding shared by every entry of the table
	binding: Ident,
	/// The wrappers to generate
	entries: Vec<WrapperEntry>,
}

/// One wrapped entry point
struct WrapperEntry {
	attrs: Vec<Attribute>,
	name: Ident,
	params: Vec<WrapperParam>,
	output: ReturnType,
	operation: Ident,
	flavor: Option<Ident>,
}

/// A `name: Type` parameter
struct WrapperParam {
	name: Ident,
	ty: Type,
}

impl Parse for WrapperParam {
	fn parse(input: ParseStream) -> syn::Result<Self> {
		let name = input.parse()?;
		input.parse::<Token![:]>()?;
		let ty = input.parse()?;
		Ok(Self { name, ty })
	}
}

impl Parse for WrapperEntry {
	fn parse(input: ParseStream) -> syn::Result<Self> {
		let attrs = input.call(Attribute::parse_outer)?;
		input.parse::<Token![fn]>()?;
		let name = input.parse()?;

		let content;
		parenthesized!(content in input);
		let params = Punctuated::<WrapperParam, Token![,]>::parse_terminated(&content)?
			.into_iter()
			.collect();

		let output = input.parse()?;
		input.parse::<Token![=>]>()?;
		let operation = input.parse()?;

		let flavor = if input.peek(Token![,]) {
			input.parse::<Token![,]>()?;
			Some(input.parse()?)
		} else {
			None
		};
		input.parse::<Token![;]>()?;

		Ok(Self {
			attrs,
			name,
			params,
			output,
			operation,
			flavor,
		})
	}
}

impl Parse for WrapperTable {
	fn parse(input: ParseStream) -> syn::Result<Self> {
		let mut runtime = None;
		let mut binding = None;

		// Header: `key = value;` pairs before the first entry
		while input.peek(Ident) && input.peek2(Token![=]) {
			let key: Ident = input.parse()?;
			input.parse::<Token![=]>()?;

			if key == "binding" {
				binding = Some(input.parse::<Ident>()?);
			} else if key == "runtime" {
				runtime = Some(input.parse::<Path>()?);
			} else {
				return Err(Error::new(key.span(), "expected `binding` or `runtime`"));
			}
			input.parse::<Token![;]>()?;
		}

		let Some(binding) = binding else {
			return Err(input.error("missing `binding = ...;` header"));
		};

		let mut entries = Vec::new();
		while !input.is_empty() {
			entries.push(input.parse()?);
		}

		Ok(Self {
			runtime,
			binding,
			entries,
		})
	}
}

/// Generate every wrapper of the table
pub fn generate_wrappers(table: &WrapperTable) -> TokenStream {
	let runtime = match &table.runtime {
		Some(path) => quote! { #path },
		None => quote! { ::sonar_rs::runtime },
	};
	let binding = &table.binding;

	let wrappers = table.entries.iter().map(|entry| {
		let attrs = &entry.attrs;
		let name = &entry.name;
		let symbol = LitStr::new(&name.to_string(), name.span());
		let output = &entry.output;
		let operation = &entry.operation;
		let flavor = match &entry.flavor {
			Some(flavor) => quote! { #flavor },
			None => quote! { Regular },
		};
		let names: Vec<_> = entry.params.iter().map(|param| &param.name).collect();
		let types: Vec<_> = entry.params.iter().map(|param| &param.ty).collect();

		quote! {
			#(#attrs)*
			#[allow(non_snake_case)]
			#[unsafe(no_mangle)]
			pub unsafe extern "C" fn #name(#(#names: #types),*) #output {
				static SITE: ::sonar_rs::CallSite = ::sonar_rs::CallSite::new(
					#symbol,
					::sonar_rs::Operation::#operation,
					::sonar_rs::Binding::#binding,
					::sonar_rs::Flavor::#flavor,
				);

				let forward = |real: unsafe extern "C" fn(#(#types),*) #output| unsafe { real(#(#names),*) };
				unsafe { #runtime().process(&SITE, forward) }
			}
		}
	});

	quote! {
		#(#wrappers)*
	}
}
