use convert_case::{Case, Casing};
use syn::{ItemStruct, LitStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum RenameAll {
    #[default]
    None,
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
}

impl RenameAll {
    pub(crate) fn apply(self, name: &str) -> String {
        match self {
            RenameAll::None => name.to_string(),
            RenameAll::Lower => name.to_lowercase(),
            RenameAll::Upper => name.to_uppercase(),
            RenameAll::Pascal => name.to_case(Case::Pascal),
            RenameAll::Camel => name.to_case(Case::Camel),
            RenameAll::Snake => name.to_case(Case::Snake),
            RenameAll::ScreamingSnake => name.to_case(Case::Snake).to_uppercase(),
            RenameAll::Kebab => name.to_case(Case::Kebab),
        }
    }
}

pub(crate) fn rename_all(item: &ItemStruct) -> RenameAll {
    let mut result = RenameAll::None;
    for attr in &item.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("ladle") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `ladle`, use it like: `#[ladle(rename_all = \"PascalCase\")]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("rename_all") {
                let Ok(v) = arg.value().and_then(|v| v.parse::<LitStr>()) else {
                    panic!("Error while parsing `rename_all`, use it like: `#[ladle(rename_all = \"PascalCase\")]`");
                };
                result = match v.value().as_str() {
                    "lowercase" => RenameAll::Lower,
                    "UPPERCASE" => RenameAll::Upper,
                    "PascalCase" => RenameAll::Pascal,
                    "camelCase" => RenameAll::Camel,
                    "snake_case" => RenameAll::Snake,
                    "SCREAMING_SNAKE_CASE" => RenameAll::ScreamingSnake,
                    "kebab-case" => RenameAll::Kebab,
                    other => panic!(
                        "Unknown `rename_all` value `{other}`, expected one of: lowercase, UPPERCASE, PascalCase, camelCase, snake_case, SCREAMING_SNAKE_CASE, kebab-case"
                    ),
                };
            } else {
                panic!(
                    "Unknown attribute `{}` inside ladle macro",
                    arg.path.get_ident().map(ToString::to_string).unwrap_or_default()
                );
            }
            Ok(())
        });
    }
    result
}
