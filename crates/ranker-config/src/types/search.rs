//! Search configuration

use serde::{Deserialize, Serialize};

/// Nearest-neighbor search configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of chunks handed to the ranking step
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Distance used to compare the query with stored chunks
    #[serde(default)]
    pub metric: DistanceMetric,
}

/// Distance between two embedding vectors; smaller is more similar
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `1 - cos(u, v)`, in `[0, 2]`
    #[default]
    Cosine,
    /// `‖u - v‖`
    Euclidean,
}

impl DistanceMetric {
    pub const OPTIONS: &'static [&'static str] = &["cosine", "euclidean"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
        }
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosine" => Ok(DistanceMetric::Cosine),
            "euclidean" | "l2" => Ok(DistanceMetric::Euclidean),
            _ => Err(crate::error::ConfigError::invalid_enum(
                "search.metric",
                s,
                Self::OPTIONS,
            )),
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            metric: DistanceMetric::default(),
        }
    }
}

impl crate::validation::Validate for SearchConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.top_k == 0 {
            return Err(ConfigError::InvalidInteger {
                field: "search.top_k".to_string(),
                value: self.top_k,
                min: 0,
            });
        }

        if self.top_k > 1000 {
            return Err(ConfigError::ValidationError {
                field: "search.top_k".to_string(),
                message: format!("top_k too large ({}), consider using <= 1000", self.top_k),
            });
        }

        Ok(())
    }
}

fn default_top_k() -> usize {
    3
}
