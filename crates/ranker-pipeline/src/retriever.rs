//! Load → segment → embed → index → query, for one job description.

use futures::stream::{self, StreamExt, TryStreamExt};
use ranker_config::{Config, DistanceMetric};
use ranker_core::chunking::{Segmenter, SlidingWindow};
use ranker_core::traits::Embedder;
use ranker_core::{Chunk, Document, IndexEntry, QueryResult, Result, RetrievalError};
use ranker_index::VectorIndex;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Knobs of a retrieval run.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub metric: DistanceMetric,
    /// Texts per embedder call
    pub batch_size: usize,
    /// Documents embedded concurrently
    pub concurrency: usize,
}

impl RetrievalSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            chunk_size: config.chunking.chunk_size,
            chunk_overlap: config.chunking.chunk_overlap,
            metric: config.search.metric,
            batch_size: config.embedding.batch_size,
            concurrency: config.input.concurrency,
        }
    }
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct Retriever {
    embedder: Arc<dyn Embedder + Send + Sync>,
    segmenter: SlidingWindow,
    metric: DistanceMetric,
    batch_size: usize,
    concurrency: usize,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder + Send + Sync>, settings: RetrievalSettings) -> Result<Self> {
        let segmenter = SlidingWindow::new(settings.chunk_size, settings.chunk_overlap)?;
        if settings.batch_size == 0 {
            return Err(RetrievalError::InvalidParameter {
                name: "batch_size",
                message: "must be > 0".to_string(),
            });
        }
        Ok(Self {
            embedder,
            segmenter,
            metric: settings.metric,
            batch_size: settings.batch_size,
            concurrency: settings.concurrency.max(1),
        })
    }

    pub fn from_config(embedder: Arc<dyn Embedder + Send + Sync>, config: &Config) -> Result<Self> {
        Self::new(embedder, RetrievalSettings::from_config(config))
    }

    /// The `k` chunks of `documents` closest to `query`, best first.
    ///
    /// Fewer than `k` results are returned when the documents hold fewer chunks.
    pub async fn retrieve_top_k(
        &self,
        query: &str,
        documents: &[Document],
        k: usize,
    ) -> Result<Vec<QueryResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }
        if documents.is_empty() {
            return Err(RetrievalError::NoValidDocuments { attempted: 0 });
        }
        if k == 0 {
            return Err(RetrievalError::InvalidParameter {
                name: "top_k",
                message: "must be >= 1".to_string(),
            });
        }

        let index = self.build_index(documents).await?;

        let query_vector = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| RetrievalError::embedding("query", e))?;
        let results = index.search(&query_vector, k)?;
        if results.is_empty() {
            return Err(RetrievalError::NoMatch);
        }
        info!(
            "Retrieved {} of {} chunks (best distance {:.4})",
            results.len(),
            index.len(),
            results[0].distance
        );
        Ok(results)
    }

    /// Segment and embed `documents` into a searchable index.
    pub async fn build_index(&self, documents: &[Document]) -> Result<VectorIndex> {
        let segmented: Vec<Vec<Chunk>> = documents
            .par_iter()
            .map(|doc| self.segmenter.segment(doc))
            .collect();
        let total_chunks: usize = segmented.iter().map(Vec::len).sum();
        info!(
            "Segmented {} documents into {} chunks",
            documents.len(),
            total_chunks
        );

        // Each document is embedded on its own; nothing is merged until all succeed
        let per_document: Vec<Vec<IndexEntry>> = stream::iter(segmented)
            .map(|chunks| self.embed_chunks(chunks))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let entries: Vec<IndexEntry> = per_document.into_iter().flatten().collect();
        let index = VectorIndex::build(self.metric, entries)?;
        info!(
            "Indexed {} chunks with {} (dim {})",
            index.len(),
            self.embedder.model_id(),
            index.dimension().unwrap_or(0)
        );
        Ok(index)
    }

    async fn embed_chunks(&self, doc_chunks: Vec<Chunk>) -> Result<Vec<IndexEntry>> {
        let mut entries = Vec::with_capacity(doc_chunks.len());
        for batch in doc_chunks.chunks(self.batch_size) {
            let stage = format!("chunks of {}", batch[0].source_document_id);
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = self
                .embedder
                .embed_batch(&texts)
                .await
                .map_err(|e| RetrievalError::embedding(stage.as_str(), e))?;
            if vectors.len() != batch.len() {
                return Err(RetrievalError::embedding(
                    stage,
                    format!("got {} vectors for {} texts", vectors.len(), batch.len()),
                ));
            }
            debug!("Embedded {} ({} texts)", stage, batch.len());
            entries.extend(
                batch
                    .iter()
                    .cloned()
                    .zip(vectors)
                    .map(|(chunk, vector)| IndexEntry::new(chunk, vector)),
            );
        }
        Ok(entries)
    }
}
