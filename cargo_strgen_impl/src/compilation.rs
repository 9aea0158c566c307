// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! The in-memory view of one crate that the pipeline runs over.
//!
//! A [`Compilation`] is a crate name plus a set of parsed source units, each
//! tagged with the module path it is mounted at. Generated artifacts are fed
//! back in as additional units, so later stages (and later runs) see them the
//! same way as hand-written code.

use std::fs;
use std::path::{Component, Path};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GenerationError, Result};

/// One parsed file, mounted at a module path relative to the crate root
#[derive(Debug, Clone)]
pub struct SourceUnit {
    name: String,
    module: Vec<String>,
    file: syn::File,
}

impl SourceUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module segments below the crate root; empty for the root module
    pub fn module(&self) -> &[String] {
        &self.module
    }

    pub fn file(&self) -> &syn::File {
        &self.file
    }
}

/// A unit of generated source text, registered under a unique name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    pub hint_name: String,
    /// Module the text belongs in, relative to the crate root
    pub module: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Compilation {
    crate_name: String,
    units: Vec<SourceUnit>,
}

impl Compilation {
    pub fn new(crate_name: impl Into<String>) -> Result<Self> {
        let crate_name = crate_name.into();
        if crate_name.is_empty() {
            return Err(GenerationError::EmptyCrateName);
        }
        Ok(Self {
            crate_name,
            units: Vec::new(),
        })
    }

    ///
    /// Parse every `.rs` file below `src_dir` into a compilation. Module paths
    /// follow the standard layout: `lib.rs`/`main.rs` is the root, `a/mod.rs`
    /// and `a.rs` are `a`, `a/b.rs` is `a::b`.
    ///
    pub fn load_dir(crate_name: impl Into<String>, src_dir: &Path) -> Result<Self> {
        let mut compilation = Compilation::new(crate_name)?;

        let mut paths = Vec::new();
        for entry in WalkDir::new(src_dir).follow_links(true) {
            let entry = entry.map_err(|e| GenerationError::Io {
                path: e.path().unwrap_or(src_dir).to_path_buf(),
                source: e.into(),
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "rs")
            {
                paths.push(entry.into_path());
            }
        }
        // WalkDir order depends on the file system
        paths.sort();

        for path in paths {
            let relative = path.strip_prefix(src_dir).unwrap_or(&path);
            let text = fs::read_to_string(&path).map_err(|source| GenerationError::Io {
                path: path.clone(),
                source,
            })?;
            let name = relative.to_string_lossy().replace('\\', "/");
            compilation.add_unit(name, module_path_for(relative), &text)?;
        }

        debug!(
            crate_name = %compilation.crate_name,
            units = compilation.units.len(),
            "loaded compilation"
        );
        Ok(compilation)
    }

    pub fn crate_name(&self) -> &str {
        &self.crate_name
    }

    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn contains_unit(&self, name: &str) -> bool {
        self.units.iter().any(|u| u.name == name)
    }

    /// Add a hand-written source file
    pub fn add_source(
        &mut self,
        name: impl Into<String>,
        module: &[&str],
        text: &str,
    ) -> Result<()> {
        let module = module.iter().map(|s| s.to_string()).collect();
        self.add_unit(name.into(), module, text)
    }

    /// Register a generated artifact with the compilation
    pub fn add_artifact(&mut self, artifact: &SourceArtifact) -> Result<()> {
        self.add_unit(
            artifact.hint_name.clone(),
            artifact.module.clone(),
            &artifact.text,
        )
    }

    fn add_unit(
        &mut self,
        name: String,
        module: Vec<String>,
        text: &str,
    ) -> Result<()> {
        if self.contains_unit(&name) {
            return Err(GenerationError::ArtifactNameCollision { name });
        }
        let file = syn::parse_file(text).map_err(|source| GenerationError::Parse {
            unit: name.clone(),
            source,
        })?;
        self.units.push(SourceUnit {
            name,
            module,
            file,
        });
        Ok(())
    }
}

/// Module segments for a file path relative to the source directory
pub fn module_path_for(relative: &Path) -> Vec<String> {
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.pop() {
        let stem = last.strip_suffix(".rs").unwrap_or(&last).to_string();
        let is_root = segments.is_empty() && (stem == "lib" || stem == "main");
        if !is_root && stem != "mod" {
            segments.push(stem);
        }
    }
    segments
}
