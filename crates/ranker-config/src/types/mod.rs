//! Configuration type definitions
//!
//! This module contains all configuration structures organized by concern.
//! Each type is self-contained with validation and sensible defaults.

pub mod chunking;
pub mod embedding;
pub mod input;
pub mod llm;
pub mod search;

// Re-export all types for convenience
pub use chunking::ChunkingConfig;
pub use embedding::{EmbeddingBackend, EmbeddingConfig};
pub use input::InputConfig;
pub use llm::LlmConfig;
pub use search::{DistanceMetric, SearchConfig};

use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
///
/// This is the top-level configuration that users interact with.
/// It's organized by pipeline stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Which candidate files are picked up and how many load at once
    #[serde(default)]
    pub input: InputConfig,

    /// Text segmentation
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding provider settings
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Nearest-neighbor search behavior
    #[serde(default)]
    pub search: SearchConfig,

    /// Text-generation service used to explain the ranking
    #[serde(default)]
    pub llm: LlmConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.input.validate()?;
        self.chunking.validate()?;
        self.embedding.validate()?;
        self.search.validate()?;
        self.llm.validate()?;

        Ok(())
    }
}
