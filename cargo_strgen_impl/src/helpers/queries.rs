// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Small syntax queries shared by the symbol table and the extractor.

use syn::ext::IdentExt;
use syn::{Ident, Path, Visibility};

/// Name of an identifier as written in paths, without any `r#` prefix
pub fn ident_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

/// Segment names of a path, ignoring generic arguments
pub fn path_segments(path: &Path) -> Vec<String> {
    path.segments.iter().map(|s| ident_name(&s.ident)).collect()
}

/// Declared accessibility of an item or field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    /// `pub`
    Public,
    /// `pub(crate)`, `pub(super)`, `pub(in path)`, `pub(self)`
    Restricted,
    /// No visibility modifier
    Private,
}

impl From<&Visibility> for Accessibility {
    fn from(vis: &Visibility) -> Self {
        match vis {
            Visibility::Public(_) => Accessibility::Public,
            Visibility::Restricted(_) => Accessibility::Restricted,
            Visibility::Inherited => Accessibility::Private,
        }
    }
}

/// Module path rendered the way it is written in Rust, crate name first
pub fn qualified_module_name(crate_name: &str, module: &[String]) -> String {
    std::iter::once(crate_name)
        .chain(module.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_name_strips_raw_prefix() {
        let ident: Ident = syn::parse_str("r#type").unwrap();
        assert_eq!(ident_name(&ident), "type");
        let ident: Ident = syn::parse_str("Age").unwrap();
        assert_eq!(ident_name(&ident), "Age");
    }

    #[test]
    fn test_path_segments() {
        let path: Path = syn::parse_str("crate::strgen::GenerateDisplay").unwrap();
        assert_eq!(path_segments(&path), vec!["crate", "strgen", "GenerateDisplay"]);
    }

    #[test]
    fn test_accessibility() {
        let cases = [
            ("pub", Accessibility::Public),
            ("pub(crate)", Accessibility::Restricted),
            ("pub(super)", Accessibility::Restricted),
            ("pub(in crate::model)", Accessibility::Restricted),
            ("", Accessibility::Private),
        ];
        for (text, expected) in cases {
            let vis: Visibility = syn::parse_str(text).unwrap();
            assert_eq!(Accessibility::from(&vis), expected, "{text}");
        }
    }

    #[test]
    fn test_qualified_module_name() {
        assert_eq!(qualified_module_name("app", &[]), "app");
        assert_eq!(
            qualified_module_name("app", &["model".to_string(), "person".to_string()]),
            "app::model::person"
        );
    }
}
