//! Environment variable configuration overlay
//!
//! Supports environment variables in the format:
//! `RANKER_<section>_<field>=value`
//!
//! Examples:
//! - `RANKER_SEARCH_TOP_K=5`
//! - `RANKER_CHUNKING_CHUNK_SIZE=800`
//! - `RANKER_EMBEDDING_BACKEND=ollama`

use crate::{error::ConfigError, types::*, Config, Result};
use std::env;

const PREFIX: &str = "RANKER_";

/// Parse configuration from environment variables
///
/// Returns `None` when no `RANKER_` variable is set. Variables that fail to
/// parse are reported on stderr and skipped.
pub fn from_env() -> Result<Option<Config>> {
    let env_vars: Vec<(String, String)> = env::vars()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .collect();

    if env_vars.is_empty() {
        return Ok(None);
    }

    let mut config = Config::default();
    for (key, value) in env_vars {
        if let Err(e) = apply_env_var(&mut config, &key, &value) {
            eprintln!("Warning: failed to parse {}: {}", key, e);
        }
    }

    Ok(Some(config))
}

/// Apply a single environment variable to config
fn apply_env_var(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let key = key.strip_prefix(PREFIX).unwrap_or(key);

    let (section, field) = match key.split_once('_') {
        Some((section, field)) if !field.is_empty() => {
            (section.to_lowercase(), field.to_lowercase())
        }
        _ => {
            return Err(ConfigError::EnvVarError {
                var: key.to_string(),
                message: "Expected format: RANKER_<section>_<field>".to_string(),
            })
        }
    };

    match section.as_str() {
        "input" => apply_input_var(&mut config.input, &field, value),
        "chunking" => apply_chunking_var(&mut config.chunking, &field, value),
        "embedding" => apply_embedding_var(&mut config.embedding, &field, value),
        "search" => apply_search_var(&mut config.search, &field, value),
        "llm" => apply_llm_var(&mut config.llm, &field, value),
        _ => Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: format!("Unknown section: {}", section),
        }),
    }
}

fn var_name(section: &str, field: &str) -> String {
    format!("{}{}_{}", PREFIX, section, field.to_uppercase())
}

fn parse_usize(section: &str, field: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Invalid integer: {}", value),
    })
}

fn unknown_field(section: &str, field: &str) -> ConfigError {
    ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Unknown field: {}", field),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn apply_input_var(config: &mut InputConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "include_paths" => config.include_paths = split_list(value),
        "exclude_paths" => config.exclude_paths = split_list(value),
        "concurrency" => config.concurrency = parse_usize("INPUT", field, value)?,
        _ => return Err(unknown_field("INPUT", field)),
    }
    Ok(())
}

fn apply_chunking_var(config: &mut ChunkingConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "chunk_size" => config.chunk_size = parse_usize("CHUNKING", field, value)?,
        "chunk_overlap" => config.chunk_overlap = parse_usize("CHUNKING", field, value)?,
        _ => return Err(unknown_field("CHUNKING", field)),
    }
    Ok(())
}

fn apply_embedding_var(config: &mut EmbeddingConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "backend" => {
            config.backend = match value.to_lowercase().as_str() {
                "openai" | "external" => EmbeddingBackend::External,
                "ollama" => EmbeddingBackend::Ollama,
                "local" => EmbeddingBackend::Local,
                _ => {
                    return Err(ConfigError::invalid_enum(
                        "embedding.backend",
                        value,
                        EmbeddingBackend::OPTIONS,
                    ))
                }
            };
        }
        "model_name" => config.model_name = value.to_string(),
        "batch_size" => config.batch_size = parse_usize("EMBEDDING", field, value)?,
        "api_base" => config.api_base = Some(value.to_string()),
        _ => return Err(unknown_field("EMBEDDING", field)),
    }
    Ok(())
}

fn apply_search_var(config: &mut SearchConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "top_k" => config.top_k = parse_usize("SEARCH", field, value)?,
        "metric" => config.metric = value.parse()?,
        _ => return Err(unknown_field("SEARCH", field)),
    }
    Ok(())
}

fn apply_llm_var(config: &mut LlmConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "model" => config.model = value.to_string(),
        "max_tokens" => {
            config.max_tokens = value.parse().map_err(|_| ConfigError::EnvVarError {
                var: "RANKER_LLM_MAX_TOKENS".to_string(),
                message: format!("Invalid integer: {}", value),
            })?;
        }
        "temperature" => {
            config.temperature = value.parse().map_err(|_| ConfigError::EnvVarError {
                var: "RANKER_LLM_TEMPERATURE".to_string(),
                message: format!("Invalid float: {}", value),
            })?;
        }
        "api_base" => config.api_base = value.to_string(),
        "api_key_env" => config.api_key_env = value.to_string(),
        "system_prompt" => config.system_prompt = value.to_string(),
        _ => return Err(unknown_field("LLM", field)),
    }
    Ok(())
}
