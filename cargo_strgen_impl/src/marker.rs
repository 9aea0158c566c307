// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! The marker attribute's own definition.
//!
//! The marker is a zero-sized tag type. Its definition is injected into the
//! compilation before anything is scanned, so attribute paths can resolve to
//! it even when no hand-written definition exists.

use quote::{format_ident, quote};
use syn::Ident;

use crate::compilation::SourceArtifact;
use crate::error::{GenerationError, Result};
use crate::helpers::render::{GENERATED_HEADER, format_tokens};

/// Parsed form of a marker path such as `crate::strgen::GenerateDisplay`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSpec {
    path: String,
    module: Vec<String>,
    name: String,
}

impl MarkerSpec {
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason: &str| GenerationError::InvalidMarkerPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = path.split("::");
        if segments.next() != Some("crate") {
            return Err(invalid("must start with 'crate::'"));
        }
        let mut segments: Vec<String> = segments.map(str::to_string).collect();
        for segment in &segments {
            if syn::parse_str::<Ident>(segment).is_err() {
                return Err(invalid(&format!("'{segment}' is not an identifier")));
            }
        }
        let name = segments.pop().ok_or_else(|| invalid("missing type name"))?;

        Ok(Self {
            path: path.to_string(),
            module: segments,
            name,
        })
    }

    /// The path as configured, `crate::` first
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn module(&self) -> &[String] {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artifact_name(&self) -> String {
        format!("__strgen_marker.{}.g.rs", self.name)
    }

    /// Source defining the marker type, registered in the marker's module
    pub fn definition(&self) -> Result<SourceArtifact> {
        let hint_name = self.artifact_name();
        let ident = format_ident!("{}", self.name);
        let tokens = quote! {
            /// Marks a struct for generated `Display` output
            #[allow(dead_code)]
            #[derive(Debug, Clone, Copy, Default)]
            pub struct #ident;
        };
        let text = format!("{GENERATED_HEADER}\n{}", format_tokens(&hint_name, tokens)?);

        Ok(SourceArtifact {
            hint_name,
            module: self.module.clone(),
            text,
        })
    }
}
