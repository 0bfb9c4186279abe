//! Chat-completions client used to turn retrieved chunks into a ranking report.

use async_trait::async_trait;
use ranker_config::LlmConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("environment variable {var} is not set; it must hold the LLM API key")]
    MissingApiKey { var: String },

    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM response contained no message content")]
    EmptyResponse,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// OpenAI-compatible `/chat/completions` client (Together, OpenAI, vLLM, ...).
pub struct ChatCompletionsClient {
    api_base: String,
    api_key: String,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
    client: Client,
}

impl ChatCompletionsClient {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let defaults = LlmConfig::default();
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
            system_prompt: defaults.system_prompt,
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            client: Client::new(),
        }
    }

    /// Build from config, reading the API key from the variable named by `api_key_env`.
    pub fn from_config(config: &LlmConfig) -> Result<Self, GenerationError> {
        let api_key = env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingApiKey {
                var: config.api_key_env.clone(),
            })?;
        Ok(Self::new(config.api_base.clone(), api_key, config.model.clone())
            .with_system_prompt(config.system_prompt.clone())
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature))
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResp {
    choices: Vec<ChatRespChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatRespChoice {
    message: ChatRespMessage,
}

#[derive(Debug, Deserialize)]
struct ChatRespMessage {
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!("Requesting completion from {} ({})", self.endpoint(), self.model);
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }
        let parsed: ChatResp = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}
