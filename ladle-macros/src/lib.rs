mod decode_field;
mod hydrator_trait;
mod rename_all;

use decode_field::decode_field;
use hydrator_trait::hydrator_trait;
use proc_macro::TokenStream;
use rename_all::rename_all;
use syn::{ItemStruct, parse_macro_input};

/// Implements `ladle::Hydrator` reading every field from the column of the same name.
///
/// Attributes:
/// * `#[ladle(rename_all = "PascalCase")]` on the struct: derive column names from field names.
/// * `#[ladle(name = "column")]` on a field: explicit column name.
/// * `#[ladle(ignore)]` on a field: the field is left untouched.
/// * `#[ladle(optional)]` on a field: the field is left untouched when the column is missing.
#[proc_macro_derive(Hydrator, attributes(ladle))]
pub fn derive_hydrator(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    let rename_all = rename_all(&item);
    let fields = item
        .fields
        .iter()
        .map(|f| decode_field(f, rename_all))
        .collect::<Vec<_>>();
    hydrator_trait(&item, &fields).into()
}
