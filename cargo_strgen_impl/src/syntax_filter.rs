// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use syn::visit::{self, Visit};
use syn::{Block, Item, ItemMod, ItemStruct};
use tracing::trace;

use crate::compilation::{Compilation, SourceUnit};
use crate::helpers::queries::ident_name;

///
/// Cheap structural check run against every item in the syntax forest:
/// is this a struct carrying at least one attribute?
///
/// Nothing is resolved here, so `#[derive(Debug)]` passes just as well as the
/// marker does. The semantic extractor sorts that out.
///
pub fn is_syntax_target(item: &Item) -> bool {
    matches!(item, Item::Struct(s) if !s.attrs.is_empty())
}

/// A struct that passed [`is_syntax_target`], with the context needed to
/// resolve it later
#[derive(Debug, Clone)]
pub struct CandidateNode<'a> {
    pub unit: &'a SourceUnit,
    /// Module the struct is written in, relative to the crate root
    pub module: Vec<String>,
    pub item: &'a ItemStruct,
    /// Declared inside a block (e.g. a function body) rather than at module level
    pub in_block: bool,
}

/// Walks all units of the compilation and collects the candidates
pub fn collect_candidates(compilation: &Compilation) -> Vec<CandidateNode<'_>> {
    let mut candidates = Vec::new();
    for unit in compilation.units() {
        let mut collector = CandidateCollector {
            unit,
            module: unit.module().to_vec(),
            block_depth: 0,
            candidates: &mut candidates,
        };
        collector.visit_file(unit.file());
    }
    candidates
}

struct CandidateCollector<'a, 'c> {
    unit: &'a SourceUnit,
    module: Vec<String>,
    block_depth: usize,
    candidates: &'c mut Vec<CandidateNode<'a>>,
}

impl<'a> Visit<'a> for CandidateCollector<'a, '_> {
    fn visit_item(&mut self, item: &'a Item) {
        if is_syntax_target(item)
            && let Item::Struct(item_struct) = item
        {
            trace!(
                unit = self.unit.name(),
                name = %item_struct.ident,
                "syntax candidate"
            );
            self.candidates.push(CandidateNode {
                unit: self.unit,
                module: self.module.clone(),
                item: item_struct,
                in_block: self.block_depth > 0,
            });
        }
        visit::visit_item(self, item);
    }

    fn visit_item_mod(&mut self, item: &'a ItemMod) {
        // `mod foo;` is a separate unit, only inline modules have content here
        if item.content.is_some() {
            self.module.push(ident_name(&item.ident));
            visit::visit_item_mod(self, item);
            self.module.pop();
        }
    }

    fn visit_block(&mut self, block: &'a Block) {
        self.block_depth += 1;
        visit::visit_block(self, block);
        self.block_depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> Item {
        syn::parse_str(text).unwrap()
    }

    #[test]
    fn test_filter_requires_struct_with_attributes() {
        assert!(is_syntax_target(&item("#[GenerateDisplay] struct A { x: u8 }")));
        assert!(is_syntax_target(&item("#[derive(Debug)] pub struct A;")));
        assert!(is_syntax_target(&item("/// docs are attributes too\nstruct A;")));
        assert!(!is_syntax_target(&item("struct A { x: u8 }")));
        assert!(!is_syntax_target(&item("#[GenerateDisplay] enum E { A }")));
        assert!(!is_syntax_target(&item("#[GenerateDisplay] fn f() {}")));
    }

    #[test]
    fn test_collects_nested_candidates() {
        let mut compilation = Compilation::new("app").unwrap();
        compilation
            .add_source(
                "model.rs",
                &["model"],
                r#"
                #[a] pub struct Top;
                pub struct Plain;
                mod inner {
                    #[b] pub struct Nested;
                }
                fn build() {
                    #[c] struct Local;
                }
                impl Plain {
                    fn make() { #[d] struct InImpl; }
                }
                "#,
            )
            .unwrap();

        let candidates = collect_candidates(&compilation);
        let found: Vec<(String, Vec<String>, bool)> = candidates
            .iter()
            .map(|c| (c.item.ident.to_string(), c.module.clone(), c.in_block))
            .collect();

        let model = vec!["model".to_string()];
        let inner = vec!["model".to_string(), "inner".to_string()];
        assert_eq!(
            found,
            vec![
                ("Top".to_string(), model.clone(), false),
                ("Nested".to_string(), inner, false),
                ("Local".to_string(), model.clone(), true),
                ("InImpl".to_string(), model, true),
            ]
        );
        assert!(candidates.iter().all(|c| c.unit.name() == "model.rs"));
    }
}
