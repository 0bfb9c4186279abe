//! Failure taxonomy of the retrieval pipeline

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Why a single candidate document could not be loaded
///
/// Recoverable: the pipeline logs it and continues with the other documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} contains no text")]
    Empty { path: PathBuf },

    #[error("{path} is not valid UTF-8 text")]
    InvalidUtf8 { path: PathBuf },

    #[error("failed to parse {path} as a paged document: {message}")]
    Unparsable { path: PathBuf, message: String },

    #[error("unsupported document type: {path} (expected .txt or .pdf)")]
    UnsupportedFormat { path: PathBuf },
}

/// Errors that abort a retrieval call
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to load document '{document}': {source}")]
    Load {
        document: String,
        #[source]
        source: LoadError,
    },

    #[error("no valid candidate documents ({attempted} attempted)")]
    NoValidDocuments { attempted: usize },

    #[error("query text is empty")]
    EmptyQuery,

    #[error("embedding backend failed while embedding {stage}: {message}")]
    Embedding { stage: String, message: String },

    #[error("embedding dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    #[error("cannot search an empty index")]
    EmptyIndex,

    #[error("search produced no matches")]
    NoMatch,

    #[error("invalid {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },
}

impl RetrievalError {
    pub fn embedding(stage: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Embedding {
            stage: stage.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_names_document() {
        let err = RetrievalError::Load {
            document: "resume_b.pdf".to_string(),
            source: LoadError::Empty {
                path: PathBuf::from("/tmp/resume_b.pdf"),
            },
        };
        let message = err.to_string();
        assert!(message.contains("resume_b.pdf"));
        assert!(message.contains("contains no text"));
    }

    #[test]
    fn test_embedding_error_names_stage() {
        let err = RetrievalError::embedding("query", "connection refused");
        assert_eq!(
            err.to_string(),
            "embedding backend failed while embedding query: connection refused"
        );
    }
}
