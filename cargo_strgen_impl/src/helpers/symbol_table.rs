// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Module-level declarations and imports of a compilation, and the path
//! resolution built on top of them.
//!
//! This is deliberately a subset of rustc's name resolution: enough to decide
//! which type an attribute path names. It understands `crate::`, `self::`,
//! `super::`, `::extern`, `use` declarations (with renames, groups and
//! globs) and module-local items. Items inside function bodies are not
//! nameable and are not recorded.

use std::collections::{HashMap, HashSet};
use std::fmt;

use syn::{Item, ItemStruct, UseTree};

use super::queries::ident_name;
use crate::compilation::Compilation;

// Guards against import cycles (`use a::b as c; use c::d as a;`)
const MAX_RESOLUTION_DEPTH: usize = 16;

/// Identity of a named item: the crate it originates from plus its path in
/// that crate. Two symbols are the same iff both parts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId {
    krate: String,
    path: Vec<String>,
}

impl SymbolId {
    pub fn new(krate: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            krate: krate.into(),
            path,
        }
    }

    fn join(mut self, rest: &[String]) -> Self {
        self.path.extend(rest.iter().cloned());
        self
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.krate)?;
        for segment in &self.path {
            write!(f, "::{segment}")?;
        }
        Ok(())
    }
}

/// A path as written in source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPath {
    pub leading_colon: bool,
    pub segments: Vec<String>,
}

impl From<&syn::Path> for WrittenPath {
    fn from(path: &syn::Path) -> Self {
        Self {
            leading_colon: path.leading_colon.is_some(),
            segments: super::queries::path_segments(path),
        }
    }
}

#[derive(Debug, Clone)]
enum Import {
    Named { alias: String, target: WrittenPath },
    Glob { base: WrittenPath },
}

pub struct SymbolTable<'a> {
    crate_name: String,
    /// Every nameable module-level path, modules included
    items: HashSet<Vec<String>>,
    structs: HashMap<Vec<String>, Vec<&'a ItemStruct>>,
    imports: HashMap<Vec<String>, Vec<Import>>,
}

impl<'a> SymbolTable<'a> {
    pub fn build(compilation: &'a Compilation) -> Self {
        let mut table = SymbolTable {
            crate_name: compilation.crate_name().to_string(),
            items: HashSet::new(),
            structs: HashMap::new(),
            imports: HashMap::new(),
        };

        for unit in compilation.units() {
            let module = unit.module().to_vec();
            for depth in 1..=module.len() {
                table.items.insert(module[..depth].to_vec());
            }
            table.record_items(&module, &unit.file().items);
        }

        table
    }

    pub fn crate_name(&self) -> &str {
        &self.crate_name
    }

    fn record_items(&mut self, module: &[String], items: &'a [Item]) {
        for item in items {
            let ident = match item {
                Item::Struct(s) => {
                    let path = child(module, ident_name(&s.ident));
                    self.structs.entry(path).or_default().push(s);
                    Some(&s.ident)
                }
                Item::Enum(e) => Some(&e.ident),
                Item::Union(u) => Some(&u.ident),
                Item::Trait(t) => Some(&t.ident),
                Item::TraitAlias(t) => Some(&t.ident),
                Item::Type(t) => Some(&t.ident),
                Item::Fn(f) => Some(&f.sig.ident),
                Item::Const(c) => Some(&c.ident),
                Item::Static(s) => Some(&s.ident),
                Item::Macro(m) => m.ident.as_ref(),
                Item::ExternCrate(e) => Some(e.rename.as_ref().map(|(_, r)| r).unwrap_or(&e.ident)),
                Item::Mod(m) => {
                    if let Some((_, content)) = &m.content {
                        let inner = child(module, ident_name(&m.ident));
                        self.record_items(&inner, content);
                    }
                    Some(&m.ident)
                }
                Item::Use(u) => {
                    let imports = self.imports.entry(module.to_vec()).or_default();
                    flatten_use(
                        &mut Vec::new(),
                        u.leading_colon.is_some(),
                        &u.tree,
                        imports,
                    );
                    None
                }
                _ => None,
            };
            if let Some(ident) = ident {
                self.items.insert(child(module, ident_name(ident)));
            }
        }
    }

    /// Structs declared at the given crate-relative path
    pub fn structs_at(&self, path: &[String]) -> &[&'a ItemStruct] {
        self.structs.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn local(&self, path: Vec<String>) -> SymbolId {
        SymbolId::new(self.crate_name.clone(), path)
    }

    /// Resolve a path written inside `module` to the symbol it names
    pub fn resolve(&self, module: &[String], path: &WrittenPath) -> Option<SymbolId> {
        self.resolve_in(module, path.leading_colon, &path.segments, 0)
    }

    fn resolve_in(
        &self,
        module: &[String],
        leading_colon: bool,
        segments: &[String],
        depth: usize,
    ) -> Option<SymbolId> {
        if depth > MAX_RESOLUTION_DEPTH {
            return None;
        }
        let (first, rest) = segments.split_first()?;

        if leading_colon {
            return Some(SymbolId::new(first.clone(), rest.to_vec()));
        }

        match first.as_str() {
            "crate" => self.walk(self.local(Vec::new()), rest, depth),
            "self" => match rest.first().map(String::as_str) {
                Some("super") => self.resolve_in(module, false, rest, depth + 1),
                _ => self.walk(self.local(module.to_vec()), rest, depth),
            },
            "super" => {
                let mut base = module.to_vec();
                base.pop()?;
                let mut rest = rest;
                while let Some((next, tail)) = rest.split_first() {
                    if next != "super" {
                        break;
                    }
                    base.pop()?;
                    rest = tail;
                }
                self.walk(self.local(base), rest, depth)
            }
            _ => self.resolve_relative(module, first, rest, depth),
        }
    }

    fn resolve_relative(
        &self,
        module: &[String],
        first: &str,
        rest: &[String],
        depth: usize,
    ) -> Option<SymbolId> {
        // An import brings the first segment into scope
        for import in self.imports_of(module) {
            if let Import::Named { alias, target } = import
                && alias == first
            {
                let resolved =
                    self.resolve_in(module, target.leading_colon, &target.segments, depth + 1)?;
                return self.walk(resolved, rest, depth);
            }
        }

        // Declared here or brought in by a glob
        if let Some(found) = self.lookup(module, first, depth + 1) {
            return self.walk(found, rest, depth);
        }

        // Anything else with more than one segment names an external crate.
        // A bare unknown name is a builtin or prelude attribute; not ours.
        if rest.is_empty() {
            None
        } else {
            Some(SymbolId::new(first, rest.to_vec()))
        }
    }

    ///
    /// Follow `segments` down from `start` one module at a time. Each segment
    /// is looked up in the module reached so far, so `pub use` re-exports on
    /// the way are followed. A segment nothing binds is kept as written.
    ///
    fn walk(&self, start: SymbolId, segments: &[String], depth: usize) -> Option<SymbolId> {
        let mut current = start;
        for (i, segment) in segments.iter().enumerate() {
            if current.krate != self.crate_name {
                return Some(current.join(&segments[i..]));
            }
            match self.lookup(&current.path, segment, depth + 1) {
                Some(next) => current = next,
                None => return Some(current.join(&segments[i..])),
            }
        }
        Some(current)
    }

    /// What `name` refers to inside `module`: an item, an import, or
    /// something a glob import of a local module provides. An item wins over
    /// an import of the same name, which can only be a macro.
    fn lookup(&self, module: &[String], name: &str, depth: usize) -> Option<SymbolId> {
        if depth > MAX_RESOLUTION_DEPTH {
            return None;
        }

        let local = child(module, name.to_string());
        if self.items.contains(&local) {
            return Some(self.local(local));
        }

        let imports = self.imports_of(module);
        for import in imports {
            if let Import::Named { alias, target } = import
                && alias == name
            {
                return self.resolve_in(module, target.leading_colon, &target.segments, depth + 1);
            }
        }

        imports.iter().find_map(|import| match import {
            Import::Glob { base } => self
                .resolve_in(module, base.leading_colon, &base.segments, depth + 1)
                .filter(|base| base.krate == self.crate_name)
                .and_then(|base| self.lookup(&base.path, name, depth + 1)),
            Import::Named { .. } => None,
        })
    }

    fn imports_of(&self, module: &[String]) -> &[Import] {
        self.imports.get(module).map(Vec::as_slice).unwrap_or_default()
    }
}

fn child(module: &[String], name: String) -> Vec<String> {
    let mut path = module.to_vec();
    path.push(name);
    path
}

fn flatten_use(prefix: &mut Vec<String>, leading_colon: bool, tree: &UseTree, out: &mut Vec<Import>) {
    match tree {
        UseTree::Path(p) => {
            prefix.push(ident_name(&p.ident));
            flatten_use(prefix, leading_colon, &p.tree, out);
            prefix.pop();
        }
        UseTree::Name(n) => {
            let name = ident_name(&n.ident);
            if name == "self" {
                if let Some(alias) = prefix.last() {
                    out.push(Import::Named {
                        alias: alias.clone(),
                        target: written(leading_colon, prefix.clone()),
                    });
                }
            } else {
                let mut segments = prefix.clone();
                segments.push(name.clone());
                out.push(Import::Named {
                    alias: name,
                    target: written(leading_colon, segments),
                });
            }
        }
        UseTree::Rename(r) => {
            let alias = ident_name(&r.rename);
            if alias == "_" {
                return;
            }
            let name = ident_name(&r.ident);
            let mut segments = prefix.clone();
            if name != "self" {
                segments.push(name);
            }
            out.push(Import::Named {
                alias,
                target: written(leading_colon, segments),
            });
        }
        UseTree::Glob(_) => out.push(Import::Glob {
            base: written(leading_colon, prefix.clone()),
        }),
        UseTree::Group(g) => {
            for item in &g.items {
                flatten_use(prefix, leading_colon, item, out);
            }
        }
    }
}

fn written(leading_colon: bool, segments: Vec<String>) -> WrittenPath {
    WrittenPath {
        leading_colon,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compilation(units: &[(&str, &[&str], &str)]) -> Compilation {
        let mut compilation = Compilation::new("app").unwrap();
        for (name, module, text) in units {
            compilation.add_source(*name, module, text).unwrap();
        }
        compilation
    }

    fn path(text: &str) -> WrittenPath {
        let path: syn::Path = syn::parse_str(text).unwrap();
        WrittenPath::from(&path)
    }

    fn module(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn local(segments: &[&str]) -> SymbolId {
        SymbolId::new("app", module(segments))
    }

    const MARKER_UNIT: (&str, &[&str], &str) = ("marker.rs", &["strgen"], "pub struct GenerateDisplay;");

    #[test]
    fn test_crate_self_and_super_paths() {
        let c = compilation(&[MARKER_UNIT]);
        let table = SymbolTable::build(&c);
        let m = module(&["model", "person"]);

        assert_eq!(
            table.resolve(&m, &path("crate::strgen::GenerateDisplay")),
            Some(local(&["strgen", "GenerateDisplay"]))
        );
        assert_eq!(
            table.resolve(&m, &path("self::Thing")),
            Some(local(&["model", "person", "Thing"]))
        );
        assert_eq!(
            table.resolve(&m, &path("super::super::strgen::GenerateDisplay")),
            Some(local(&["strgen", "GenerateDisplay"]))
        );
        assert_eq!(
            table.resolve(&m, &path("self::super::Sibling")),
            Some(local(&["model", "Sibling"]))
        );
        // Cannot go above the crate root
        assert_eq!(table.resolve(&[], &path("super::Thing")), None);
    }

    #[test]
    fn test_imports_and_renames() {
        let c = compilation(&[
            MARKER_UNIT,
            (
                "model.rs",
                &["model"],
                "use crate::strgen::GenerateDisplay;\nuse crate::strgen::{self as markers, GenerateDisplay as Show};",
            ),
        ]);
        let table = SymbolTable::build(&c);
        let m = module(&["model"]);
        let marker = Some(local(&["strgen", "GenerateDisplay"]));

        assert_eq!(table.resolve(&m, &path("GenerateDisplay")), marker);
        assert_eq!(table.resolve(&m, &path("Show")), marker);
        assert_eq!(table.resolve(&m, &path("markers::GenerateDisplay")), marker);
        // Imports are per module
        assert_eq!(table.resolve(&[], &path("Show")), None);
    }

    #[test]
    fn test_module_local_and_glob() {
        let c = compilation(&[
            MARKER_UNIT,
            ("lib.rs", &[], "mod strgen;\nstruct Local;"),
            ("model.rs", &["model"], "use crate::strgen::*;"),
        ]);
        let table = SymbolTable::build(&c);

        assert_eq!(
            table.resolve(&[], &path("strgen::GenerateDisplay")),
            Some(local(&["strgen", "GenerateDisplay"]))
        );
        assert_eq!(table.resolve(&[], &path("Local")), Some(local(&["Local"])));
        assert_eq!(
            table.resolve(&module(&["model"]), &path("GenerateDisplay")),
            Some(local(&["strgen", "GenerateDisplay"]))
        );
        assert_eq!(table.resolve(&module(&["model"]), &path("Missing")), None);
    }

    #[test]
    fn test_external_and_builtin_paths() {
        let c = compilation(&[("lib.rs", &[], "use other_crate::markers;")]);
        let table = SymbolTable::build(&c);

        assert_eq!(
            table.resolve(&[], &path("serde::Serialize")),
            Some(SymbolId::new("serde", module(&["Serialize"])))
        );
        assert_eq!(
            table.resolve(&[], &path("::strgen::GenerateDisplay")),
            Some(SymbolId::new("strgen", module(&["GenerateDisplay"])))
        );
        assert_eq!(
            table.resolve(&[], &path("markers::GenerateDisplay")),
            Some(SymbolId::new("other_crate", module(&["markers", "GenerateDisplay"])))
        );
        assert_eq!(table.resolve(&[], &path("derive")), None);
    }

    #[test]
    fn test_reexports_are_followed() {
        let c = compilation(&[
            MARKER_UNIT,
            ("prelude.rs", &["prelude"], "pub use crate::strgen::GenerateDisplay;"),
            ("glob.rs", &["glob"], "pub use crate::prelude::*;"),
            ("model.rs", &["model"], "use crate::strgen::GenerateDisplay;"),
        ]);
        let table = SymbolTable::build(&c);
        let marker = Some(local(&["strgen", "GenerateDisplay"]));

        assert_eq!(table.resolve(&[], &path("crate::prelude::GenerateDisplay")), marker);
        assert_eq!(table.resolve(&[], &path("glob::GenerateDisplay")), marker);
        assert_eq!(
            table.resolve(&module(&["model"]), &path("self::GenerateDisplay")),
            marker
        );
        assert_eq!(
            table.resolve(&module(&["model"]), &path("super::glob::GenerateDisplay")),
            marker
        );
    }

    #[test]
    fn test_glob_cycle_terminates() {
        let c = compilation(&[
            ("a.rs", &["a"], "pub use crate::b::*;"),
            ("b.rs", &["b"], "pub use crate::a::*;"),
        ]);
        let table = SymbolTable::build(&c);
        assert_eq!(
            table.resolve(&[], &path("crate::a::Missing")),
            Some(local(&["a", "Missing"]))
        );
    }

    #[test]
    fn test_import_cycle_terminates() {
        let c = compilation(&[("lib.rs", &[], "use b::X as a;\nuse a::Y as b;")]);
        let table = SymbolTable::build(&c);
        assert_eq!(table.resolve(&[], &path("a")), None);
    }

    #[test]
    fn test_inline_modules_and_fn_bodies() {
        let c = compilation(&[(
            "lib.rs",
            &[],
            "mod inner { pub struct Deep; }\nfn f() { struct Hidden; }",
        )]);
        let table = SymbolTable::build(&c);

        assert_eq!(table.structs_at(&module(&["inner", "Deep"])).len(), 1);
        assert!(table.structs_at(&module(&["Hidden"])).is_empty());
        assert!(table.structs_at(&module(&["f", "Hidden"])).is_empty());
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(local(&["strgen", "GenerateDisplay"]).to_string(), "app::strgen::GenerateDisplay");
    }
}
