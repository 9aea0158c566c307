// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use tracing::trace;

use crate::compilation::Compilation;
use crate::helpers::queries::Accessibility;
use crate::semantic_model::SemanticModel;
use crate::summary::StructuralSummary;
use crate::syntax_filter::{CandidateNode, collect_candidates};

/// Every summary in the compilation, in source order
pub fn summarize(compilation: &Compilation, marker_path: &str) -> Vec<StructuralSummary> {
    let model = SemanticModel::new(compilation);
    collect_candidates(compilation)
        .iter()
        .filter_map(|candidate| extract_summary(&model, candidate, marker_path))
        .collect()
}

///
/// Turn a syntax candidate into a summary, if it really is marked.
///
/// Returns `None` when the struct's own symbol or the marker symbol cannot
/// be resolved, or when none of the struct's attributes resolve to the marker.
/// That's the common case for candidates and not an error.
///
pub fn extract_summary<'a>(
    model: &SemanticModel<'a>,
    candidate: &CandidateNode<'a>,
    marker_path: &str,
) -> Option<StructuralSummary> {
    let type_symbol = model.declared_symbol(candidate);
    let marker_symbol = model.type_by_qualified_name(marker_path);

    let (Some(type_symbol), Some(marker_symbol)) = (type_symbol, marker_symbol) else {
        trace!(
            name = %candidate.item.ident,
            unit = candidate.unit.name(),
            "candidate or marker did not resolve"
        );
        return None;
    };

    if !type_symbol
        .attribute_classes(model)
        .iter()
        .any(|class| *class == marker_symbol)
    {
        trace!(symbol = %type_symbol.id(), "candidate is not marked");
        return None;
    }

    let member_names: Vec<String> = type_symbol
        .members()
        .into_iter()
        .filter(|member| member.accessibility == Accessibility::Public)
        .map(|member| member.name)
        .collect();

    Some(StructuralSummary::new(
        type_symbol.containing_namespace(),
        type_symbol.name(),
        member_names,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "crate::strgen::GenerateDisplay";

    fn summaries(units: &[(&str, &[&str], &str)]) -> Vec<StructuralSummary> {
        let mut compilation = Compilation::new("main_app").unwrap();
        for (name, module, text) in units {
            compilation.add_source(*name, module, text).unwrap();
        }
        summarize(&compilation, MARKER)
    }

    const MARKER_UNIT: (&str, &[&str], &str) = ("strgen.rs", &["strgen"], "pub struct GenerateDisplay;");

    #[test]
    fn test_public_fields_only_in_declaration_order() {
        let found = summaries(&[
            MARKER_UNIT,
            (
                "model.rs",
                &["model"],
                r#"
                use crate::strgen::GenerateDisplay;
                #[GenerateDisplay]
                pub struct Account {
                    pub Name: String,
                    Secret: String,
                    pub(crate) Token: String,
                    pub Balance: i64,
                }
                "#,
            ),
        ]);

        assert_eq!(
            found,
            vec![StructuralSummary::new("main_app::model", "Account", ["Name", "Balance"])]
        );
    }

    #[test]
    fn test_same_named_attribute_from_elsewhere_is_ignored() {
        let found = summaries(&[
            MARKER_UNIT,
            ("fake.rs", &["fake"], "pub struct GenerateDisplay;"),
            (
                "lib.rs",
                &[],
                r#"
                #[fake::GenerateDisplay] pub struct A { pub x: u8 }
                #[other_crate::strgen::GenerateDisplay] pub struct B { pub x: u8 }
                #[GenerateDisplay] pub struct C { pub x: u8 }
                #[strgen::GenerateDisplay] pub struct D { pub x: u8 }
                "#,
            ),
        ]);

        // C has no import in scope; only D names the real marker
        assert_eq!(found, vec![StructuralSummary::new("main_app", "D", ["x"])]);
    }

    #[test]
    fn test_missing_marker_definition_yields_nothing() {
        let found = summaries(&[(
            "lib.rs",
            &[],
            "#[crate::strgen::GenerateDisplay] pub struct A { pub x: u8 }",
        )]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_function_local_struct_is_skipped() {
        let found = summaries(&[
            MARKER_UNIT,
            (
                "lib.rs",
                &[],
                "fn f() { #[crate::strgen::GenerateDisplay] struct Local { pub x: u8 } }",
            ),
        ]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_raw_identifiers_and_empty_types() {
        let found = summaries(&[
            MARKER_UNIT,
            (
                "lib.rs",
                &[],
                r#"
                use strgen::GenerateDisplay as Show;
                #[Show] pub struct r#Match { pub r#type: u8 }
                #[Show] pub struct Empty { private: u8 }
                #[Show] pub struct Unit;
                "#,
            ),
        ]);
        assert_eq!(
            found,
            vec![
                StructuralSummary::new("main_app", "Match", ["r#type"]),
                StructuralSummary::new("main_app", "Empty", Vec::<String>::new()),
                StructuralSummary::new("main_app", "Unit", Vec::<String>::new()),
            ]
        );
    }
}
