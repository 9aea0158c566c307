use std::fs::File;
use std::io;
use std::path::Path;

use ron::de::from_reader;
use ron::ser::{PrettyConfig, to_writer_pretty};

use crate::GeneratorConfig;

///
/// Fluent builder for [`GeneratorConfig`].
///
/// # Example
/// ```
/// use cargo_strgen_config::ConfigBuilder;
/// let config = ConfigBuilder::new()
///     .marker_path("crate::markers::Show")
///     .output_dir("generated")
///     .build()
///     .unwrap();
/// assert_eq!(config.output_dir, "generated");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: GeneratorConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_path(mut self, path: impl Into<String>) -> Self {
        self.config.marker_path = path.into();
        self
    }

    pub fn source_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.source_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn artifact_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.artifact_extension = ext.into();
        self
    }

    pub fn watch_interval_ms(mut self, interval: u64) -> Self {
        self.config.watch_interval_ms = interval;
        self
    }

    /// Validate and return the finished configuration
    pub fn build(self) -> anyhow::Result<GeneratorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    // Method to write the configuration to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        to_writer_pretty(file, &self.config, PrettyConfig::default()).map_err(io::Error::other)?;
        Ok(())
    }

    // Method to read a configuration back from a file. The result is not
    // validated until `build` is called.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let config: GeneratorConfig = from_reader(file).map_err(io::Error::other)?;
        Ok(ConfigBuilder { config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_MARKER_PATH, DEFAULT_SOURCE_DIR};
    use tempfile::NamedTempFile;

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.marker_path, DEFAULT_MARKER_PATH);
        assert_eq!(config.source_dir, DEFAULT_SOURCE_DIR);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .marker_path("crate::display::Generate")
            .source_dir("lib")
            .artifact_extension("rsx")
            .watch_interval_ms(50)
            .build()
            .unwrap();

        assert_eq!(config.marker_path, "crate::display::Generate");
        assert_eq!(config.source_dir, "lib");
        assert_eq!(config.artifact_extension, "rsx");
        assert_eq!(config.watch_interval_ms, 50);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let result = ConfigBuilder::new().watch_interval_ms(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_write_and_read_file() {
        let builder = ConfigBuilder::new().output_dir("out/generated");

        let temp_file = NamedTempFile::new().unwrap();
        builder.write_to_file(temp_file.path()).unwrap();

        let loaded = ConfigBuilder::read_from_file(temp_file.path())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(loaded.output_dir, "out/generated");
        assert_eq!(loaded.marker_path, DEFAULT_MARKER_PATH);
    }

    #[test]
    fn test_read_garbage_is_an_error() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "this is not ron {").unwrap();
        assert!(ConfigBuilder::read_from_file(temp_file.path()).is_err());
    }
}
