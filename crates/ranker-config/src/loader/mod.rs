//! Configuration loading from various sources

pub mod env;
pub mod file;
pub mod formats;
pub mod merge;
pub mod overrides;

pub use overrides::ConfigOverrides;

use crate::{Config, Result, Validate};
use std::path::{Path, PathBuf};

/// Default config file names, searched in order in the working directory
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    ".ranker.toml",
    ".ranker.yml",
    ".ranker.yaml",
    ".ranker.json",
];

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Configuration source for layered loading
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Load from a file
    File(PathBuf),
    /// Load from environment variables
    Environment,
    /// Explicit config object (programmatic use), merged like a file
    Explicit(Config),
    /// Individually set fields (CLI flags), applied as given
    Overrides(ConfigOverrides),
}

/// Builder for loading and merging configurations
///
/// Supports layered configuration with proper precedence:
/// defaults < file < environment < explicit config < overrides
///
/// # Example
///
/// ```no_run
/// use ranker_config::loader::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file(".ranker.toml")
///     .with_env()
///     .build()?;
/// # Ok::<(), ranker_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
}

impl ConfigBuilder {
    /// Create a new config builder starting with defaults
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Add the first default config file found in the working directory, if any
    pub fn with_default_file(self) -> Self {
        match DEFAULT_CONFIG_FILES
            .iter()
            .find(|path| Path::new(path).exists())
        {
            Some(path) => self.with_file(path),
            None => self,
        }
    }

    /// Add environment variable overlay
    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Environment);
        self
    }

    /// Add explicit config overlay
    pub fn with_config(mut self, config: Config) -> Self {
        self.sources.push(ConfigSource::Explicit(config));
        self
    }

    /// Add command-line overrides; set fields win over every earlier layer
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.sources.push(ConfigSource::Overrides(overrides));
        self
    }

    /// Build and validate the final configuration
    ///
    /// Merges all sources in order, with later sources taking precedence.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        for source in self.sources {
            match source {
                ConfigSource::File(path) => {
                    let file_config = file::load_from_file(&path)?;
                    config = merge::merge(config, file_config);
                }
                ConfigSource::Environment => {
                    if let Some(env_config) = env::from_env()? {
                        config = merge::merge(config, env_config);
                    }
                }
                ConfigSource::Explicit(explicit_config) => {
                    config = merge::merge(config, explicit_config);
                }
                ConfigSource::Overrides(overrides) => overrides.apply(&mut config),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Uses the first of `.ranker.toml`, `.ranker.yml`, `.ranker.yaml`,
    /// `.ranker.json` found in the working directory, or defaults when none
    /// exists. Environment variable overlays are always applied.
    pub fn load() -> Result<Self> {
        ConfigBuilder::new().with_default_file().with_env().build()
    }

    /// Load configuration from a specific file
    ///
    /// Also applies environment variable overlays.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkingConfig;
    use std::io::Write;

    #[test]
    fn test_builder_default() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[search]\ntop_k = 5\n\n[chunking]\nchunk_size = 400").unwrap();

        let explicit = Config {
            chunking: ChunkingConfig {
                chunk_size: 600,
                ..Default::default()
            },
            ..Default::default()
        };

        let config = ConfigBuilder::new()
            .with_file(file.path())
            .with_config(explicit)
            .build()
            .unwrap();
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.chunking.chunk_size, 600);
    }

    #[test]
    fn test_overrides_equal_to_default_still_win() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "search:\n  top_k: 5\nchunking:\n  chunk_size: 400").unwrap();

        let config = ConfigBuilder::new()
            .with_file(file.path())
            .with_overrides(ConfigOverrides {
                top_k: Some(3),
                chunk_size: Some(1000),
                chunk_overlap: None,
            })
            .build()
            .unwrap();
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 100);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = ConfigBuilder::new()
            .with_overrides(ConfigOverrides {
                chunk_size: Some(50),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_merge_result_rejected() {
        let explicit = Config {
            chunking: ChunkingConfig {
                chunk_size: 50,
                chunk_overlap: 100,
            },
            ..Default::default()
        };
        assert!(ConfigBuilder::new().with_config(explicit).build().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ConfigBuilder::new()
            .with_file("/definitely/not/here/.ranker.toml")
            .build();
        assert!(result.is_err());
    }
}
