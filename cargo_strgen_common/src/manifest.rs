// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";

/// One generated artifact, along with the summary it was generated from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Artifact file name, e.g. `main_app.model.Person.g.rs`
    pub artifact_name: String,
    /// Fully qualified module path of the type
    pub namespace: String,
    pub type_name: String,
    /// Public field names, in declaration order
    #[serde(default)]
    pub member_names: Vec<String>,
}

///
/// Record of what a previous `cargo strgen generate` wrote to the output
/// directory. Lets a new process skip rewriting artifacts whose inputs have
/// not changed, so their timestamps survive and cargo doesn't rebuild.
///
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationManifest {
    /// Crate the artifacts were generated for
    pub crate_name: String,
    /// Artifact name of the injected marker definition
    pub marker_artifact: Option<String>,
    pub entries: Vec<ManifestEntry>,
    /// Directory the manifest lives in (not serialized)
    #[serde(skip)]
    base_dir: PathBuf,
}

impl GenerationManifest {
    pub fn new(crate_name: impl Into<String>, dir_path: impl AsRef<Path>) -> Self {
        Self {
            crate_name: crate_name.into(),
            marker_artifact: None,
            entries: Vec::new(),
            base_dir: dir_path.as_ref().to_path_buf(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.base_dir.join(MANIFEST_FILE)
    }

    /// Serialize this manifest into its base directory
    pub fn serialize_to_file(&self) -> Result<PathBuf> {
        if self.crate_name.is_empty() {
            return Err(anyhow::anyhow!(
                "Cannot serialize GenerationManifest with empty crate_name"
            ));
        }

        fs::create_dir_all(&self.base_dir)
            .context(format!("Failed to create directory: {}", self.base_dir.display()))?;

        let file_path = self.manifest_path();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&file_path)
            .context(format!(
                "Failed to open file for writing: {}",
                file_path.display()
            ))?;

        serde_json::to_writer_pretty(file, &self).context(format!(
            "Failed to serialize GenerationManifest to: {}",
            file_path.display()
        ))?;

        Ok(file_path)
    }

    /// Load the manifest from a directory. A missing manifest is not an error,
    /// it just means nothing was generated there yet.
    pub fn load_from_dir(dir_path: &Path) -> Result<Option<GenerationManifest>> {
        let file_path = dir_path.join(MANIFEST_FILE);
        if !file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&file_path)
            .context(format!("Failed to read file: {}", file_path.display()))?;
        let mut manifest: GenerationManifest = serde_json::from_str(&content)
            .context(format!("Failed to parse JSON from: {}", file_path.display()))?;
        manifest.base_dir = dir_path.to_path_buf();

        Ok(Some(manifest))
    }

    /// Reads back the text of a recorded artifact, if it is still on disk
    pub fn read_artifact(&self, entry: &ManifestEntry) -> Option<String> {
        fs::read_to_string(self.base_dir.join(&entry.artifact_name)).ok()
    }

    /// Sorts entries for a stable on-disk representation
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.artifact_name.cmp(&b.artifact_name));
    }
}
