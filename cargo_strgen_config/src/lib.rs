// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod config_builder;
mod generator_config;

pub use config_builder::ConfigBuilder;
pub use generator_config::{
    DEFAULT_ARTIFACT_EXTENSION, DEFAULT_CONFIG_FILE, DEFAULT_MARKER_PATH, DEFAULT_OUTPUT_DIR,
    DEFAULT_SOURCE_DIR, DEFAULT_WATCH_INTERVAL_MS, GeneratorConfig,
};
