// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use proc_macro2::TokenStream;

use crate::error::{GenerationError, Result};

/// First line of every file we write
pub const GENERATED_HEADER: &str = "// @generated by cargo-strgen. Do not edit.";

/// Pretty-print generated tokens as a source file
pub fn format_tokens(unit: &str, tokens: TokenStream) -> Result<String> {
    let syntax_tree = syn::parse2::<syn::File>(tokens).map_err(|source| GenerationError::Parse {
        unit: unit.to_string(),
        source,
    })?;
    Ok(prettyplease::unparse(&syntax_tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn test_format_tokens() {
        let text = format_tokens("a.g.rs", quote! { pub struct   A ; }).unwrap();
        assert_eq!(text, "pub struct A;\n");
    }

    #[test]
    fn test_format_tokens_rejects_non_items() {
        let err = format_tokens("bad.g.rs", quote! { 1 + 1 }).unwrap_err();
        assert!(matches!(err, GenerationError::Parse { unit, .. } if unit == "bad.g.rs"));
    }
}
