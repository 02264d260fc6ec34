// Procedural macros for rusty-query

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derive macro for the `Record` and `Reflect` traits
///
/// Each named field may carry a binding tag naming its external key.
/// Untagged fields and fields tagged `"-"` are never read or written, but
/// untagged fields holding a record are still decoded in place.
///
/// # Example
///
/// ```ignore
/// #[derive(Record, Default)]
/// pub struct TileParams {
///     #[query("w")]
///     pub width: u32,
///     #[query = "max_zoom"]
///     pub max_zoom: Option<f64>,
///     #[query("-")]
///     pub cache_hits: u64,
///     pub size: Size,
/// }
/// ```
#[proc_macro_derive(Record, attributes(query))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    record::impl_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
