// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod helpers;

mod cache;
mod compilation;
mod counter;
mod driver;
mod emitter;
mod error;
mod marker;
mod semantic_extractor;
mod semantic_model;
mod summary;
pub mod syntax_filter;

// Re-export our public API
pub use cache::ChangeDetectionCache;
pub use compilation::Compilation;
pub use compilation::SourceArtifact;
pub use compilation::SourceUnit;
pub use compilation::module_path_for;
pub use counter::GenerationCounter;
pub use driver::GenerationRun;
pub use driver::GeneratorDriver;
pub use emitter::CodeEmitter;
pub use emitter::DisplayTemplate;
pub use error::GenerationError;
pub use error::Result;
pub use marker::MarkerSpec;
pub use semantic_extractor::extract_summary;
pub use semantic_extractor::summarize;
pub use semantic_model::MemberSymbol;
pub use semantic_model::SemanticModel;
pub use semantic_model::TypeSymbol;
pub use summary::StructuralSummary;
