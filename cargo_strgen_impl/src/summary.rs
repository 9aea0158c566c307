// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use cargo_strgen_common::manifest::ManifestEntry;

///
/// The minimal description of a marked type needed to generate code for it.
///
/// Equality is value equality over all three parts, and `member_names` is
/// compared as a sequence: the same members in a different order is a
/// different summary, and is regenerated.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuralSummary {
    namespace_name: String,
    type_name: String,
    member_names: Vec<String>,
}

impl StructuralSummary {
    pub fn new(
        namespace_name: impl Into<String>,
        type_name: impl Into<String>,
        member_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            namespace_name: namespace_name.into(),
            type_name: type_name.into(),
            member_names: member_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Fully qualified module path, crate name first
    pub fn namespace_name(&self) -> &str {
        &self.namespace_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn member_names(&self) -> &[String] {
        &self.member_names
    }

    /// `{namespace}.{type_name}` with `::` written as `.`; keys the generation
    /// counter and prefixes the artifact name
    pub fn artifact_key(&self) -> String {
        format!("{}.{}", self.namespace_name.replace("::", "."), self.type_name)
    }

    pub fn artifact_name(&self, extension: &str) -> String {
        format!("{}.g.{}", self.artifact_key(), extension)
    }

    /// Module segments below the crate root
    pub fn module_path(&self) -> Vec<String> {
        self.namespace_name
            .split("::")
            .skip(1)
            .map(str::to_string)
            .collect()
    }

    pub fn to_manifest_entry(&self, extension: &str) -> ManifestEntry {
        ManifestEntry {
            artifact_name: self.artifact_name(extension),
            namespace: self.namespace_name.clone(),
            type_name: self.type_name.clone(),
            member_names: self.member_names.clone(),
        }
    }

    pub fn from_manifest_entry(entry: &ManifestEntry) -> Self {
        Self::new(
            entry.namespace.clone(),
            entry.type_name.clone(),
            entry.member_names.iter().cloned(),
        )
    }
}
