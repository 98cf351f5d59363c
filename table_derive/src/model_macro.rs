use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Error, Fields};

use crate::parsing::has_attribute;

/// Convenience attribute macro that adds all necessary derives for a database model
///
/// Fields marked `#[has_many]` hold loaded relations rather than columns, so
/// they are skipped when decoding a row and default to empty when deserializing.
pub fn model_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(item as DeriveInput);

    let fields = match &mut input.data {
        Data::Struct(data) => &mut data.fields,
        _ => {
            return Error::new_spanned(&input.ident, "model can only be used on structs")
                .to_compile_error()
                .into()
        }
    };

    if let Fields::Named(named) = fields {
        for field in named.named.iter_mut() {
            if has_attribute(&field.attrs, "has_many") {
                field.attrs.push(parse_quote!(#[sqlx(skip)]));
                field.attrs.push(parse_quote!(#[serde(default)]));
            }
        }
    }

    let expanded = quote! {
        #[derive(
            Debug,
            Clone,
            serde::Serialize,
            serde::Deserialize,
            sqlx::FromRow,
            ::store_models::table_derive::TableMetadata
        )]
        #input
    };

    TokenStream::from(expanded)
}
