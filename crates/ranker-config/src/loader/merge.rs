//! Configuration merging logic
//!
//! Merges configurations from multiple sources with proper precedence.

use crate::{types::*, Config};

/// Merge two configurations, with `overlay` taking precedence
///
/// Non-default values from `overlay` override values in `base`, field by field.
pub fn merge(mut base: Config, overlay: Config) -> Config {
    base.input = merge_input(base.input, overlay.input);
    base.chunking = merge_chunking(base.chunking, overlay.chunking);
    base.embedding = merge_embedding(base.embedding, overlay.embedding);
    base.search = merge_search(base.search, overlay.search);
    base.llm = merge_llm(base.llm, overlay.llm);

    base
}

/// Pick `overlay` when it differs from the default, otherwise keep `base`
fn pick<T: PartialEq>(base: T, overlay: T, default: &T) -> T {
    if overlay != *default {
        overlay
    } else {
        base
    }
}

fn merge_input(base: InputConfig, overlay: InputConfig) -> InputConfig {
    let default = InputConfig::default();
    InputConfig {
        include_paths: pick(base.include_paths, overlay.include_paths, &default.include_paths),
        exclude_paths: pick(base.exclude_paths, overlay.exclude_paths, &default.exclude_paths),
        concurrency: pick(base.concurrency, overlay.concurrency, &default.concurrency),
    }
}

fn merge_chunking(base: ChunkingConfig, overlay: ChunkingConfig) -> ChunkingConfig {
    let default = ChunkingConfig::default();
    ChunkingConfig {
        chunk_size: pick(base.chunk_size, overlay.chunk_size, &default.chunk_size),
        chunk_overlap: pick(base.chunk_overlap, overlay.chunk_overlap, &default.chunk_overlap),
    }
}

fn merge_embedding(base: EmbeddingConfig, overlay: EmbeddingConfig) -> EmbeddingConfig {
    let default = EmbeddingConfig::default();
    EmbeddingConfig {
        backend: pick(base.backend, overlay.backend, &default.backend),
        model_name: pick(base.model_name, overlay.model_name, &default.model_name),
        batch_size: pick(base.batch_size, overlay.batch_size, &default.batch_size),
        api_base: overlay.api_base.or(base.api_base),
    }
}

fn merge_search(base: SearchConfig, overlay: SearchConfig) -> SearchConfig {
    let default = SearchConfig::default();
    SearchConfig {
        top_k: pick(base.top_k, overlay.top_k, &default.top_k),
        metric: pick(base.metric, overlay.metric, &default.metric),
    }
}

fn merge_llm(base: LlmConfig, overlay: LlmConfig) -> LlmConfig {
    let default = LlmConfig::default();
    LlmConfig {
        model: pick(base.model, overlay.model, &default.model),
        max_tokens: pick(base.max_tokens, overlay.max_tokens, &default.max_tokens),
        temperature: if (overlay.temperature - default.temperature).abs() > 0.001 {
            overlay.temperature
        } else {
            base.temperature
        },
        api_base: pick(base.api_base, overlay.api_base, &default.api_base),
        api_key_env: pick(base.api_key_env, overlay.api_key_env, &default.api_key_env),
        system_prompt: pick(base.system_prompt, overlay.system_prompt, &default.system_prompt),
    }
}
