// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the generation pipeline.
///
/// An unresolvable candidate (missing symbol, missing marker) is not in here:
/// that case silently produces no summary.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Two distinct marked types map onto the same artifact name
    #[error("artifact name '{name}' is produced by more than one marked type")]
    ArtifactNameCollision { name: String },

    /// The marker definition cannot be injected because its name is taken
    #[error("cannot inject marker definition: '{name}' already exists in the compilation")]
    MarkerEmissionConflict { name: String },

    #[error("invalid marker path '{path}': {reason}")]
    InvalidMarkerPath { path: String, reason: String },

    #[error("'{name}' is not a valid Rust identifier")]
    InvalidIdentifier { name: String },

    #[error("crate name must not be empty")]
    EmptyCrateName,

    #[error("failed to parse '{unit}': {source}")]
    Parse {
        unit: String,
        #[source]
        source: syn::Error,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = GenerationError> = std::result::Result<T, E>;
