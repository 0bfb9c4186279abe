//! Candidate document discovery and loading

use serde::{Deserialize, Serialize};

/// Which files in the resume directory are loaded, and how many at once
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputConfig {
    /// Glob patterns (relative to the resume directory) for files to load
    ///
    /// Defaults to every file, so that unsupported formats are reported by the
    /// loader instead of being skipped here. Example: `["**/*.txt", "**/*.pdf"]`
    #[serde(default = "default_include_paths")]
    pub include_paths: Vec<String>,

    /// Glob patterns for files to skip
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Documents loaded (and embedded) concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            include_paths: default_include_paths(),
            exclude_paths: vec![],
            concurrency: default_concurrency(),
        }
    }
}

impl crate::validation::Validate for InputConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        if self.include_paths.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "input.include_paths".to_string(),
                message: "Must have at least one include pattern".to_string(),
            });
        }

        if self.include_paths.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::ValidationError {
                field: "input.include_paths".to_string(),
                message: "Include patterns cannot be empty strings".to_string(),
            });
        }

        validate_positive("input.concurrency", self.concurrency, 0)?;

        Ok(())
    }
}

fn default_include_paths() -> Vec<String> {
    vec!["**/*".to_string()]
}

fn default_concurrency() -> usize {
    4
}
