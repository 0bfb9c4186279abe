//! LLM configuration

use serde::{Deserialize, Serialize};

/// Text-generation service used to explain the ranking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// Chat model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens for the generated explanation
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// System message sent ahead of the prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl crate::validation::Validate for LlmConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_range;

        if self.model.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "llm.model".to_string(),
                message: "Model name cannot be empty".to_string(),
            });
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError {
                field: "llm.max_tokens".to_string(),
                message: "max_tokens must be > 0".to_string(),
            });
        }

        validate_range("llm.temperature", self.temperature, 0.0, 2.0)?;

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                field: "llm.api_base".to_string(),
                message: format!(
                    "API base must start with http:// or https://, got: {}",
                    self.api_base
                ),
            });
        }

        if self.api_key_env.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "llm.api_key_env".to_string(),
                message: "Environment variable name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn default_model() -> String {
    "meta-llama/Llama-3-8b-chat-hf".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_api_base() -> String {
    "https://api.together.xyz/v1".to_string()
}

fn default_api_key_env() -> String {
    "TOGETHER_API_KEY".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful HR assistant.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = LlmConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_model_invalid() {
        let config = LlmConfig {
            model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_tokens_invalid() {
        let config = LlmConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let config = LlmConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_api_base() {
        let config = LlmConfig {
            api_base: "not-a-url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
