use futures::stream::{self, StreamExt};
use ranker_core::loader::{document_id, load_document};
use ranker_core::{Document, LoadError, Result, RetrievalError};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of loading a batch of candidate documents.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Loaded documents, in input order
    pub documents: Vec<Document>,
    /// One `RetrievalError::Load` per skipped document
    pub failures: Vec<RetrievalError>,
}

impl LoadReport {
    pub fn attempted(&self) -> usize {
        self.documents.len() + self.failures.len()
    }
}

/// Load every path on the blocking pool, at most `concurrency` at a time.
///
/// A document that fails to load is logged and skipped. The call only fails
/// when nothing could be loaded.
pub async fn load_documents(paths: Vec<PathBuf>, concurrency: usize) -> Result<LoadReport> {
    let attempted = paths.len();
    let results: Vec<(PathBuf, std::result::Result<Document, LoadError>)> =
        stream::iter(paths.into_iter().map(|path| async move {
            let task_path = path.clone();
            let result = tokio::task::spawn_blocking(move || load_document(&task_path))
                .await
                .unwrap_or_else(|e| {
                    Err(LoadError::Io {
                        path: path.clone(),
                        source: io::Error::new(io::ErrorKind::Other, e.to_string()),
                    })
                });
            (path, result)
        }))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut report = LoadReport::default();
    for (path, result) in results {
        match result {
            Ok(doc) => report.documents.push(doc),
            Err(source) => {
                let err = RetrievalError::Load {
                    document: document_id(&path),
                    source,
                };
                warn!("Skipping document: {}", err);
                report.failures.push(err);
            }
        }
    }

    if report.documents.is_empty() {
        return Err(RetrievalError::NoValidDocuments { attempted });
    }
    info!(
        "Loaded {} of {} documents",
        report.documents.len(),
        report.attempted()
    );
    Ok(report)
}

/// Read the job description; blank input is `EmptyQuery`.
pub async fn load_query(path: &Path) -> Result<String> {
    let task_path = path.to_path_buf();
    let loaded = tokio::task::spawn_blocking(move || load_document(&task_path))
        .await
        .unwrap_or_else(|e| {
            Err(LoadError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, e.to_string()),
            })
        });
    match loaded {
        Ok(doc) => Ok(doc.text().trim().to_string()),
        Err(LoadError::Empty { .. }) => Err(RetrievalError::EmptyQuery),
        Err(source) => Err(RetrievalError::Load {
            document: document_id(path),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_report_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for name in ["c.txt", "a.txt", "b.txt"] {
            let path = dir.path().join(name);
            fs::write(&path, format!("resume {}", name)).unwrap();
            paths.push(path);
        }
        let report = load_documents(paths, 2).await.unwrap();
        let ids: Vec<&str> = report.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c.txt", "a.txt", "b.txt"]);
        assert_eq!(report.attempted(), 3);
    }

    #[tokio::test]
    async fn test_no_paths() {
        assert!(matches!(
            load_documents(Vec::new(), 4).await,
            Err(RetrievalError::NoValidDocuments { attempted: 0 })
        ));
    }

    #[tokio::test]
    async fn test_query_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        fs::write(&path, "\n  Senior backend engineer  \n").unwrap();
        assert_eq!(load_query(&path).await.unwrap(), "Senior backend engineer");
    }

    #[tokio::test]
    async fn test_blank_query_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        fs::write(&path, "   \n").unwrap();
        assert!(matches!(
            load_query(&path).await,
            Err(RetrievalError::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn test_missing_query_file_names_it() {
        let dir = tempfile::tempdir().unwrap();
        match load_query(&dir.path().join("job.txt")).await {
            Err(RetrievalError::Load { document, .. }) => assert_eq!(document, "job.txt"),
            other => panic!("expected Load error, got {other:?}"),
        }
    }
}
