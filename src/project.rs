// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Everything `cargo strgen` needs to know about the crate it runs in.

use anyhow::{Context, Result, anyhow};
use cargo_strgen_common::cli::StrgenArgs;
use cargo_strgen_common::workspace::{crate_ident, find_workspace_config};
use cargo_strgen_config::{ConfigBuilder, DEFAULT_CONFIG_FILE, GeneratorConfig};
use cargo_strgen_impl::Compilation;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq)]
pub enum ProjectType {
    ConfiguredProject,
    RustProject,
    OtherDirectory,
}

/// Validates the given directory to determine the project type
pub fn validate_project(dir: &Path) -> ProjectType {
    let has_config = dir.join(DEFAULT_CONFIG_FILE).exists();
    let has_cargo_toml = dir.join("Cargo.toml").exists();

    if has_config && has_cargo_toml {
        ProjectType::ConfiguredProject
    } else if has_cargo_toml {
        ProjectType::RustProject
    } else {
        ProjectType::OtherDirectory
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub crate_name: String,
    pub config: GeneratorConfig,
    out_dir_override: Option<PathBuf>,
}

impl Project {
    /// Load the crate rooted at `root`, with the configuration picked from
    /// `--config`, then the workspace root, then the defaults.
    pub fn load(root: &Path, args: &StrgenArgs) -> Result<Self> {
        let crate_name = read_crate_name(&root.join("Cargo.toml"))?;
        let config = load_config(root, args.config_path.as_deref())?;
        if let Some(out_dir) = &args.out_dir {
            config
                .check_output_dir(out_dir)
                .context("Invalid --out-dir")?;
        }

        Ok(Self {
            root: root.to_path_buf(),
            crate_name,
            config,
            out_dir_override: args.out_dir.as_ref().map(PathBuf::from),
        })
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.config.source_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        match &self.out_dir_override {
            Some(dir) => self.root.join(dir),
            None => self.root.join(&self.config.output_dir),
        }
    }

    pub fn load_compilation(&self) -> Result<Compilation> {
        let source_dir = self.source_dir();
        Compilation::load_dir(&self.crate_name, &source_dir)
            .with_context(|| format!("Failed to load sources from {}", source_dir.display()))
    }
}

fn load_config(root: &Path, config_path: Option<&str>) -> Result<GeneratorConfig> {
    let path = match config_path {
        Some(path) => Some(root.join(path)),
        None => {
            let local = root.join(DEFAULT_CONFIG_FILE);
            if local.exists() {
                Some(local)
            } else {
                find_workspace_config(root, DEFAULT_CONFIG_FILE)
            }
        }
    };

    match path {
        Some(path) => ConfigBuilder::read_from_file(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .build()
            .with_context(|| format!("Invalid configuration in {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

/// The crate's name as it appears in paths, read from `[package] name`
pub fn read_crate_name(cargo_toml: &Path) -> Result<String> {
    let content = fs::read_to_string(cargo_toml)
        .with_context(|| format!("Failed to read {}", cargo_toml.display()))?;
    let manifest: toml::Table = content
        .parse()
        .with_context(|| format!("Failed to parse {}", cargo_toml.display()))?;

    manifest
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(|name| name.as_str())
        .map(crate_ident)
        .ok_or_else(|| anyhow!("{} has no [package] name", cargo_toml.display()))
}
