//! Configuration management for the resume ranker
//!
//! This crate provides a validated configuration system with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Config validation with helpful error messages
//! - Config merging (file + environment + CLI)
//! - Type-safe configuration structs
//!
//! # Example
//!
//! ```no_run
//! use ranker_config::Config;
//!
//! // Load from default location (.ranker.{toml,yml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("path/to/config.toml")?;
//!
//! let chunk_size = config.chunking.chunk_size;
//! let top_k = config.search.top_k;
//! # Ok::<(), ranker_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::{ConfigBuilder, ConfigOverrides};
pub use types::*;

/// Trait for config validation
pub use validation::Validate;
