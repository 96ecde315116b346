use glob::glob;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::hash_map::DefaultHasher;
use std::env;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use syn::{LitStr, parse_macro_input};

pub fn template_assets_impl(input: TokenStream) -> TokenStream {
    let pattern = parse_macro_input!(input as LitStr);
    let pattern_str = pattern.value();

    // Patterns are relative to the crate being compiled.
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .expect("Compilation environment error: CARGO_MANIFEST_DIR environment variable not set");
    let full_pattern = PathBuf::from(manifest_dir).join(&pattern_str);
    let full_pattern_str = full_pattern.to_string_lossy();

    let mut files: Vec<String> = match glob(&full_pattern_str) {
        Ok(paths) => paths
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .map(|path| path.to_string_lossy().to_string())
            .collect(),
        Err(e) => {
            return syn::Error::new(pattern.span(), format!("Invalid glob pattern: {}", e))
                .to_compile_error()
                .into();
        }
    };
    files.sort();

    // `include_str!` embeds file contents so runtime does not touch the filesystem.
    let assets: Vec<_> = files
        .iter()
        .map(|f| {
            quote! {
                (#f, include_str!(#f))
            }
        })
        .collect();

    // One registration function per pattern, so the macro can be used more than once.
    let mut hasher = DefaultHasher::new();
    pattern_str.hash(&mut hasher);
    let fn_name = format_ident!("__stem_register_templates_{}", hasher.finish());

    let output = quote! {
        #[stem::ctor::ctor]
        fn #fn_name() {
            let assets: &[(&str, &str)] = &[
                #(#assets),*
            ];
            // Runs before `main`, so there is no caller to return to. The
            // loader logs the rejection and the set keeps none of these assets.
            let _ = stem::TEMPLATES.load_assets(assets);
        }
    };

    output.into()
}
