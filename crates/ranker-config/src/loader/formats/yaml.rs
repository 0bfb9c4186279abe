//! YAML format parser

use crate::{error::ConfigError, Config, Result};

/// Parse configuration from YAML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse configuration from YAML string with file path for better errors
pub fn parse_with_path(content: &str, path: Option<&str>) -> Result<Config> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::from_yaml_error(e, content, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
search:
  top_k: 5
chunking:
  chunk_size: 800
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.chunking.chunk_size, 800);
        assert_eq!(config.chunking.chunk_overlap, 100);
    }

    #[test]
    fn test_parse_empty_yaml() {
        let config = parse("{}").unwrap();
        assert_eq!(config.search.top_k, 3);
    }

    #[test]
    fn test_parse_invalid_metric() {
        let yaml = r#"
search:
  metric: manhattan
"#;
        let err = parse_with_path(yaml, Some(".ranker.yml")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(".ranker.yml"));
        assert!(message.contains("manhattan"));
    }
}
