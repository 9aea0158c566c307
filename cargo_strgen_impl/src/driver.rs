// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Hosts the pipeline: one [`GeneratorDriver::run`] per compilation pass.
//!
//! The driver owns the marker, the emitter and the change-detection cache,
//! so it has to live as long as the session whose passes should be
//! incremental.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use cargo_strgen_common::manifest::GenerationManifest;
use cargo_strgen_config::GeneratorConfig;
use tracing::{debug, info, warn};

use crate::cache::ChangeDetectionCache;
use crate::compilation::{Compilation, SourceArtifact};
use crate::counter::GenerationCounter;
use crate::emitter::CodeEmitter;
use crate::error::{GenerationError, Result};
use crate::marker::MarkerSpec;
use crate::semantic_extractor::summarize;
use crate::summary::StructuralSummary;

/// What one pass produced
#[derive(Debug, Clone)]
pub struct GenerationRun {
    pub marker_artifact: SourceArtifact,
    /// Every marked type's artifact, in source order
    pub artifacts: Vec<(StructuralSummary, SourceArtifact)>,
    /// Artifact names that went through the emitter this pass
    pub emitted: Vec<String>,
    /// Artifact names served from the cache
    pub reused: Vec<String>,
    /// Artifact names produced by an earlier pass that no longer exist
    pub removed: Vec<String>,
}

impl GenerationRun {
    pub fn summaries(&self) -> impl Iterator<Item = &StructuralSummary> {
        self.artifacts.iter().map(|(summary, _)| summary)
    }

    pub fn is_emitted(&self, artifact_name: &str) -> bool {
        self.emitted.iter().any(|name| name == artifact_name)
    }

    /// Manifest describing this pass, to be written next to its artifacts
    pub fn to_manifest(&self, crate_name: &str, dir: &Path, extension: &str) -> GenerationManifest {
        let mut manifest = GenerationManifest::new(crate_name, dir);
        manifest.marker_artifact = Some(self.marker_artifact.hint_name.clone());
        manifest.entries = self
            .summaries()
            .map(|summary| summary.to_manifest_entry(extension))
            .collect();
        manifest.sort();
        manifest
    }
}

pub struct GeneratorDriver {
    marker: MarkerSpec,
    emitter: CodeEmitter,
    cache: ChangeDetectionCache,
}

impl GeneratorDriver {
    pub fn new(
        marker_path: &str,
        extension: impl Into<String>,
        counter: Arc<GenerationCounter>,
    ) -> Result<Self> {
        Ok(Self {
            marker: MarkerSpec::parse(marker_path)?,
            emitter: CodeEmitter::new(extension, counter),
            cache: ChangeDetectionCache::new(),
        })
    }

    pub fn from_config(config: &GeneratorConfig, counter: Arc<GenerationCounter>) -> Result<Self> {
        Self::new(&config.marker_path, config.artifact_extension.clone(), counter)
    }

    pub fn counter(&self) -> &Arc<GenerationCounter> {
        self.emitter.counter()
    }

    ///
    /// Prime the cache from a manifest written by an earlier process. Entries
    /// whose artifact is missing on disk, or was written with a different
    /// extension, are skipped and will be regenerated. Returns how many
    /// entries were seeded.
    ///
    pub fn seed_from_manifest(&mut self, manifest: &GenerationManifest) -> usize {
        let mut seeded = 0;
        for entry in &manifest.entries {
            let summary = StructuralSummary::from_manifest_entry(entry);
            let hint_name = summary.artifact_name(self.emitter.extension());
            if hint_name != entry.artifact_name {
                debug!(artifact = %entry.artifact_name, "manifest entry has a stale name");
                continue;
            }
            let Some(text) = manifest.read_artifact(entry) else {
                debug!(artifact = %entry.artifact_name, "manifest entry has no file");
                continue;
            };
            let module = summary.module_path();
            self.cache.seed(
                summary,
                SourceArtifact {
                    hint_name,
                    module,
                    text,
                },
            );
            seeded += 1;
        }
        seeded
    }

    ///
    /// Run one pass over `compilation`: inject the marker, extract summaries,
    /// emit what changed and register every artifact with the compilation.
    ///
    /// The compilation must not already contain this driver's output, so
    /// each pass starts from a freshly loaded one.
    ///
    pub fn run(&mut self, compilation: &mut Compilation) -> Result<GenerationRun> {
        let marker_artifact = self.marker.definition()?;
        if compilation.contains_unit(&marker_artifact.hint_name) {
            return Err(GenerationError::MarkerEmissionConflict {
                name: marker_artifact.hint_name,
            });
        }
        compilation.add_artifact(&marker_artifact)?;

        let summaries = summarize(compilation, self.marker.path());
        check_collisions(&summaries, self.emitter.extension())?;

        let mut artifacts = Vec::with_capacity(summaries.len());
        let mut emitted = Vec::new();
        let mut reused = Vec::new();
        for summary in summaries {
            let artifact = match self.cache.lookup(&summary) {
                Some(cached) => {
                    debug!(artifact = %cached.hint_name, "unchanged, reusing");
                    reused.push(cached.hint_name.clone());
                    cached.clone()
                }
                None => {
                    let artifact = self.emitter.emit(&summary)?;
                    emitted.push(artifact.hint_name.clone());
                    artifact
                }
            };
            artifacts.push((summary, artifact));
        }

        for (_, artifact) in &artifacts {
            compilation.add_artifact(artifact)?;
        }

        let removed = self.cache.commit(artifacts.iter().cloned());
        for name in &removed {
            warn!(artifact = %name, "marked type is gone");
        }

        info!(
            crate_name = compilation.crate_name(),
            emitted = emitted.len(),
            reused = reused.len(),
            removed = removed.len(),
            "generation pass complete"
        );

        Ok(GenerationRun {
            marker_artifact,
            artifacts,
            emitted,
            reused,
            removed,
        })
    }
}

fn check_collisions(summaries: &[StructuralSummary], extension: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for summary in summaries {
        let name = summary.artifact_name(extension);
        if !seen.insert(name.clone()) {
            return Err(GenerationError::ArtifactNameCollision { name });
        }
    }
    Ok(())
}
