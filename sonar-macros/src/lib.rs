extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod operation_table;
mod wrappers;

use operation_table::generate_operation_table;
use wrappers::{WrapperTable, generate_wrappers};

/// Derive the dense operation table for an enum
///
/// Every variant carries a `#[markers("ENT", "EXT")]` attribute naming its
/// enter and exit markers, or `#[markers("ENT", "EXT", alias)]` when it
/// intentionally reuses the pair of an earlier variant. The derive emits
/// `COUNT`, `ALL`, `index`, `name` and the `OperationTable` implementation
/// whose `TABLE` is indexed by discriminant.
#[proc_macro_derive(OperationTable, attributes(markers))]
pub fn operation_table(item: TokenStream) -> TokenStream {
	let input = parse_macro_input!(item as DeriveInput);

	match generate_operation_table(&input) {
		Ok(output) => output.into(),
		Err(err) => err.to_compile_error().into(),
	}
}

/// Generate forwarding wrappers from a declarative signature table
///
/// # Example
///
/// ```ignore
/// sonar_rs::interpose! {
///     binding = C;
///
///     fn MPI_Barrier(comm: Comm) -> c_int => Barrier;
///     fn MPI_Send_c(buf: SendBuf, count: LargeCount, datatype: Datatype,
///                   dest: c_int, tag: c_int, comm: Comm) -> c_int => Send, Large;
/// }
/// ```
///
/// Each entry becomes an exported `extern "C"` function with exactly the
/// declared name and signature, whose body hands the call to the runtime's
/// dispatcher. An optional `runtime = path;` header selects the function
/// returning the `&'static Runtime` to dispatch through.
#[proc_macro]
pub fn interpose(item: TokenStream) -> TokenStream {
	let table = parse_macro_input!(item as WrapperTable);
	generate_wrappers(&table).into()
}
