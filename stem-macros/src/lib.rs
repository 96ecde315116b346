mod assets;
mod data;

use proc_macro::TokenStream;

/// Embeds every file matching a glob pattern (relative to the crate root) and
/// registers them into `stem::TEMPLATES` at program start, each named after
/// its file.
///
/// ```ignore
/// stem::template_assets!["templates/**/*.html"];
/// ```
#[proc_macro]
pub fn template_assets(input: TokenStream) -> TokenStream {
    assets::template_assets_impl(input)
}

/// Derives `stem::ToValue` for a struct with named fields, producing a map
/// keyed by field name.
///
/// Field attributes: `#[data("key")]` or `#[data(rename = "key")]` to change
/// the key, `#[data(skip)]` to leave the field out.
#[proc_macro_derive(Data, attributes(data))]
pub fn derive_data(input: TokenStream) -> TokenStream {
    data::derive_data_impl(input)
}
