use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{DeriveInput, LitStr, parse_macro_input};

pub fn derive_data_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match input.data {
        syn::Data::Struct(data) => match data.fields {
            syn::Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new_spanned(name, "Data only supports structs with named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Data only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut inserts = Vec::new();
    for f in &fields {
        let (key, skip) = match parse_field_attrs(f) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error().into(),
        };
        if skip {
            continue;
        }
        let field_name = &f.ident;
        let key_lit = LitStr::new(&key, Span::call_site());
        inserts.push(quote! {
            map.insert(#key_lit.to_string(), stem::ToValue::to_value(&self.#field_name));
        });
    }

    TokenStream::from(quote! {
        impl #impl_generics stem::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> stem::Value {
                let mut map = std::collections::HashMap::new();
                #(#inserts)*
                stem::Value::Map(map)
            }
        }
    })
}

/// Reads `#[data("key")]`, `#[data(rename = "key")]` and `#[data(skip)]`.
fn parse_field_attrs(field: &syn::Field) -> syn::Result<(String, bool)> {
    let mut name = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_default();
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("data") {
            continue;
        }
        if let Ok(s) = attr.parse_args::<LitStr>() {
            name = s.value();
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let s: LitStr = meta.value()?.parse()?;
                name = s.value();
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok((name, skip))
}
