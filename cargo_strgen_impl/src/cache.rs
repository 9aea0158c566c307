// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use std::collections::BTreeMap;

use crate::compilation::SourceArtifact;
use crate::summary::StructuralSummary;

#[derive(Debug, Clone)]
struct CacheEntry {
    summary: StructuralSummary,
    artifact: SourceArtifact,
}

///
/// Artifacts from the previous pass, keyed by artifact key.
///
/// A summary that is equal to the cached one for its key gets the cached
/// artifact back and never reaches the emitter. [`ChangeDetectionCache::commit`]
/// replaces the whole generation at the end of a pass.
///
#[derive(Debug, Clone, Default)]
pub struct ChangeDetectionCache {
    entries: BTreeMap<String, CacheEntry>,
}

impl ChangeDetectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached artifact, if `summary` is unchanged since it was produced
    pub fn lookup(&self, summary: &StructuralSummary) -> Option<&SourceArtifact> {
        self.entries
            .get(&summary.artifact_key())
            .filter(|entry| entry.summary == *summary)
            .map(|entry| &entry.artifact)
    }

    /// Record an artifact produced outside the current process
    pub fn seed(&mut self, summary: StructuralSummary, artifact: SourceArtifact) {
        self.entries
            .insert(summary.artifact_key(), CacheEntry { summary, artifact });
    }

    ///
    /// Replace the cache with this pass's results and return the artifact
    /// names that were cached before but are gone now, sorted.
    ///
    pub fn commit(
        &mut self,
        current: impl IntoIterator<Item = (StructuralSummary, SourceArtifact)>,
    ) -> Vec<String> {
        let next: BTreeMap<String, CacheEntry> = current
            .into_iter()
            .map(|(summary, artifact)| (summary.artifact_key(), CacheEntry { summary, artifact }))
            .collect();

        let removed = self
            .entries
            .iter()
            .filter(|(key, _)| !next.contains_key(*key))
            .map(|(_, entry)| entry.artifact.hint_name.clone())
            .collect();

        self.entries = next;
        removed
    }
}
