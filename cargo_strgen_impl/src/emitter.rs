// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use std::sync::Arc;

use quote::quote;
use syn::Ident;
use tracing::info;

use crate::compilation::SourceArtifact;
use crate::counter::GenerationCounter;
use crate::error::{GenerationError, Result};
use crate::helpers::render::{GENERATED_HEADER, format_tokens};
use crate::summary::StructuralSummary;

const MEMBER_SEPARATOR: &str = "; ";

///
/// The shape of a generated `Display` output: `label:value` for each member,
/// joined by `"; "`. Labels are member names without any `r#` prefix.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTemplate {
    labels: Vec<String>,
}

impl DisplayTemplate {
    pub fn for_summary(summary: &StructuralSummary) -> Self {
        Self {
            labels: summary
                .member_names()
                .iter()
                .map(|name| unraw(name).to_string())
                .collect(),
        }
    }

    /// The `format!` string the generated impl writes with
    pub fn format_string(&self) -> String {
        self.labels
            .iter()
            .map(|label| format!("{label}:{{}}"))
            .collect::<Vec<_>>()
            .join(MEMBER_SEPARATOR)
    }
}

///
/// Renders summaries into `Display` impls.
///
/// Each call to [`CodeEmitter::emit`] bumps the shared counter for the
/// summary's artifact key and stamps the new count into the text.
///
#[derive(Debug, Clone)]
pub struct CodeEmitter {
    extension: String,
    counter: Arc<GenerationCounter>,
}

impl CodeEmitter {
    pub fn new(extension: impl Into<String>, counter: Arc<GenerationCounter>) -> Self {
        Self {
            extension: extension.into(),
            counter,
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn counter(&self) -> &Arc<GenerationCounter> {
        &self.counter
    }

    pub fn emit(&self, summary: &StructuralSummary) -> Result<SourceArtifact> {
        let hint_name = summary.artifact_name(&self.extension);
        let type_ident = rust_ident(summary.type_name())?;
        let fields = summary
            .member_names()
            .iter()
            .map(|name| rust_ident(name))
            .collect::<Result<Vec<_>>>()?;
        let format_string = DisplayTemplate::for_summary(summary).format_string();

        let tokens = quote! {
            #[automatically_derived]
            impl ::core::fmt::Display for #type_ident {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::write!(f, #format_string #(, self.#fields)*)
                }
            }
        };
        let body = format_tokens(&hint_name, tokens)?;

        let count = self.counter.increment(&summary.artifact_key());
        info!(artifact = %hint_name, count, "emitted");

        Ok(SourceArtifact {
            hint_name,
            module: summary.module_path(),
            text: format!("// Generation count: {count}\n{GENERATED_HEADER}\n{body}"),
        })
    }
}

fn unraw(name: &str) -> &str {
    name.strip_prefix("r#").unwrap_or(name)
}

/// Identifier for a name, made raw when the name is a keyword
fn rust_ident(name: &str) -> Result<Ident> {
    let name = unraw(name);
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map_err(|_| GenerationError::InvalidIdentifier {
            name: name.to_string(),
        })
}
