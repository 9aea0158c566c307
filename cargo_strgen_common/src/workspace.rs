// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use cargo_metadata::MetadataCommand;
use std::path::{Path, PathBuf};

/// Find the named configuration file in the root of the workspace `dir`
/// belongs to, using cargo metadata
pub fn find_workspace_config(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let metadata = MetadataCommand::new()
        .current_dir(dir)
        .no_deps()
        .exec()
        .ok()?;
    let config = metadata.workspace_root.join(file_name);
    if config.exists() {
        Some(config.into_std_path_buf())
    } else {
        None
    }
}

/// Turns a Cargo package name into the identifier it is referred to by in Rust paths
pub fn crate_ident(package_name: &str) -> String {
    package_name.replace('-', "_")
}
