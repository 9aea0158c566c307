// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Name of the configuration file looked up at the workspace root
pub const DEFAULT_CONFIG_FILE: &str = "strgen.ron";

/// Fully qualified path of the marker attribute, relative to the crate being generated for
pub const DEFAULT_MARKER_PATH: &str = "crate::strgen::GenerateDisplay";
pub const DEFAULT_SOURCE_DIR: &str = "src";
pub const DEFAULT_OUTPUT_DIR: &str = ".strgen";
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "rs";
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 500;

///
/// Everything cargo-strgen needs to know to run over a crate. Every field
/// has a default, so an empty `()` RON document is a valid configuration.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Path of the marker attribute type. Must start with `crate::`; the last
    /// segment is the type name and the segments in between are the module the
    /// marker definition is injected into.
    pub marker_path: String,
    /// Directory, relative to the crate root, containing the sources to scan
    pub source_dir: String,
    /// Directory generated artifacts and the manifest are written to
    pub output_dir: String,
    /// File extension used for generated artifact names
    pub artifact_extension: String,
    /// How long `cargo strgen watch` waits for the sources to settle after a
    /// change before regenerating
    pub watch_interval_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker_path: DEFAULT_MARKER_PATH.to_string(),
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            artifact_extension: DEFAULT_ARTIFACT_EXTENSION.to_string(),
            watch_interval_ms: DEFAULT_WATCH_INTERVAL_MS,
        }
    }
}

impl GeneratorConfig {
    /// Checks the values that the generator cannot work around at run time.
    pub fn validate(&self) -> Result<()> {
        let segments: Vec<&str> = self.marker_path.split("::").collect();
        if segments.first() != Some(&"crate") || segments.len() < 2 {
            bail!(
                "marker_path '{}' must be a crate-relative path such as '{}'",
                self.marker_path,
                DEFAULT_MARKER_PATH
            );
        }
        if segments[1..].iter().any(|s| s.trim().is_empty()) {
            bail!("marker_path '{}' contains an empty segment", self.marker_path);
        }
        if self.artifact_extension.is_empty() || self.artifact_extension.contains('.') {
            bail!(
                "artifact_extension '{}' must be a non-empty extension without dots",
                self.artifact_extension
            );
        }
        if self.source_dir.is_empty() || self.output_dir.is_empty() {
            bail!("source_dir and output_dir must not be empty");
        }
        self.check_output_dir(&self.output_dir)?;
        if self.watch_interval_ms == 0 {
            bail!("watch_interval_ms must be greater than zero");
        }
        Ok(())
    }

    ///
    /// Generated files are written as `.rs` and would be scanned again as
    /// sources on the next run, so the output directory may not be the
    /// source directory or lie below it.
    ///
    pub fn check_output_dir(&self, output_dir: &str) -> Result<()> {
        if normalized(output_dir).starts_with(normalized(&self.source_dir)) {
            bail!(
                "output_dir '{}' must not be inside source_dir '{}'",
                output_dir,
                self.source_dir
            );
        }
        Ok(())
    }

    pub fn from_ron_str(ron_str: &str) -> Result<Self> {
        let config: GeneratorConfig = ron::from_str(ron_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}

fn normalized(dir: &str) -> PathBuf {
    Path::new(dir)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
