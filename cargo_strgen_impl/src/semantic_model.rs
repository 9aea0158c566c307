// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use syn::{Fields, ItemStruct};

use crate::compilation::Compilation;
use crate::helpers::queries::{Accessibility, ident_name, qualified_module_name};
use crate::helpers::symbol_table::{SymbolId, SymbolTable, WrittenPath};
use crate::syntax_filter::CandidateNode;

///
/// Symbol-level view of a compilation: which paths name which declarations.
/// Built once per pass and shared by every candidate.
///
pub struct SemanticModel<'a> {
    table: SymbolTable<'a>,
}

impl<'a> SemanticModel<'a> {
    pub fn new(compilation: &'a Compilation) -> Self {
        Self {
            table: SymbolTable::build(compilation),
        }
    }

    ///
    /// Look up a struct type by its qualified name (`crate::a::B` or
    /// `<crate name>::a::B`). `None` if nothing by that name is declared.
    ///
    pub fn type_by_qualified_name(&self, qualified_name: &str) -> Option<SymbolId> {
        let mut segments = qualified_name.split("::").map(str::to_string);
        let root = segments.next()?;
        if root != "crate" && root != self.table.crate_name() {
            return None;
        }
        let path: Vec<String> = segments.collect();
        if path.is_empty() || self.table.structs_at(&path).is_empty() {
            return None;
        }
        Some(self.table.local(path))
    }

    ///
    /// The symbol declared by a candidate node. Only module-level structs are
    /// nameable; anything inside a function body resolves to nothing.
    ///
    pub fn declared_symbol(&self, candidate: &CandidateNode<'a>) -> Option<TypeSymbol<'a>> {
        if candidate.in_block {
            return None;
        }
        let mut path = candidate.module.clone();
        path.push(ident_name(&candidate.item.ident));

        // Must be this very declaration, not a same-named one elsewhere
        self.table
            .structs_at(&path)
            .iter()
            .any(|declared| std::ptr::eq(*declared, candidate.item))
            .then(|| TypeSymbol {
                id: self.table.local(path),
                module: candidate.module.clone(),
                namespace: qualified_module_name(self.table.crate_name(), &candidate.module),
                item: candidate.item,
            })
    }

    /// Resolve an attribute path written in `module`
    pub fn resolve_path(&self, module: &[String], path: &syn::Path) -> Option<SymbolId> {
        self.table.resolve(module, &WrittenPath::from(path))
    }
}

/// A resolved struct declaration
#[derive(Debug, Clone)]
pub struct TypeSymbol<'a> {
    id: SymbolId,
    module: Vec<String>,
    namespace: String,
    item: &'a ItemStruct,
}

impl<'a> TypeSymbol<'a> {
    pub fn id(&self) -> &SymbolId {
        &self.id
    }

    /// Simple name, without any `r#` prefix
    pub fn name(&self) -> String {
        ident_name(&self.item.ident)
    }

    /// Fully qualified module path the type lives in, crate name first
    pub fn containing_namespace(&self) -> &str {
        &self.namespace
    }

    /// The classes of the type's attributes, in source order. Attributes that
    /// do not resolve to anything (builtins like `derive`) are skipped.
    pub fn attribute_classes(&self, model: &SemanticModel<'a>) -> Vec<SymbolId> {
        self.item
            .attrs
            .iter()
            .filter_map(|attr| model.resolve_path(&self.module, attr.path()))
            .collect()
    }

    /// Fields declared directly on the type, in declaration order.
    /// Tuple and unit structs have no named members.
    pub fn members(&self) -> Vec<MemberSymbol> {
        match &self.item.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .filter_map(|field| {
                    field.ident.as_ref().map(|ident| MemberSymbol {
                        name: ident.to_string(),
                        accessibility: Accessibility::from(&field.vis),
                    })
                })
                .collect(),
            Fields::Unnamed(_) | Fields::Unit => Vec::new(),
        }
    }
}

/// A named field. `name` is as written, so a raw identifier keeps its `r#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSymbol {
    pub name: String,
    pub accessibility: Accessibility,
}
