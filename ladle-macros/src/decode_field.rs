use crate::rename_all::RenameAll;
use syn::{Field, Ident, LitStr, Type, ext::IdentExt};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) column: String,
    pub(crate) ignore: bool,
    pub(crate) optional: bool,
}

pub(crate) fn decode_field(field: &Field, rename_all: RenameAll) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Hydrator can only be derived for structs with named fields");
    let mut metadata = FieldMetadata {
        column: rename_all.apply(&ident.unraw().to_string()),
        ident,
        ty: field.ty.clone(),
        ignore: false,
        optional: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("ladle") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `ladle`, use it like: `#[ladle(attribute = value, ...)]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(|v| v.parse::<LitStr>()) else {
                    panic!("Error while parsing `name`, use it like: `#[ladle(name = \"my_column\")]`");
                };
                metadata.column = v.value();
            } else if arg.path.is_ident("ignore") {
                let Err(..) = arg.value() else {
                    panic!("Error while parsing `ignore`, use it like: `#[ladle(ignore)]`");
                };
                metadata.ignore = true;
            } else if arg.path.is_ident("optional") {
                let Err(..) = arg.value() else {
                    panic!("Error while parsing `optional`, use it like: `#[ladle(optional)]`");
                };
                metadata.optional = true;
            } else {
                panic!(
                    "Unknown attribute `{}` inside ladle macro",
                    arg.path.get_ident().map(ToString::to_string).unwrap_or_default()
                );
            }
            Ok(())
        });
    }
    metadata
}
