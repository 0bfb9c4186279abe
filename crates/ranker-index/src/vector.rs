use crate::metric::{distance, DistanceMetric};
use ranker_core::{IndexEntry, QueryResult, Result, RetrievalError};
use tracing::debug;

/// Brute-force nearest-neighbour index over embedded chunks.
///
/// Entries are only appended; every search scans all of them. All stored
/// vectors share the dimension of the first one inserted.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    metric: DistanceMetric,
    dimension: Option<usize>,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            metric,
            dimension: None,
            entries: Vec::new(),
        }
    }

    /// Build an index from `entries`, keeping their order. Zero entries is
    /// allowed here; searching such an index fails with `EmptyIndex`.
    pub fn build(metric: DistanceMetric, entries: Vec<IndexEntry>) -> Result<Self> {
        let mut index = Self::new(metric);
        index.entries.reserve(entries.len());
        for entry in entries {
            index.insert(entry)?;
        }
        debug!(
            "Built {} index with {} entries (dim {:?})",
            index.metric,
            index.len(),
            index.dimension
        );
        Ok(index)
    }

    pub fn insert(&mut self, entry: IndexEntry) -> Result<()> {
        match self.dimension {
            Some(expected) if expected != entry.dimension() => {
                return Err(RetrievalError::DimensionMismatch {
                    expected,
                    actual: entry.dimension(),
                    context: format!("index entry for chunk {}", entry.chunk.id),
                });
            }
            Some(_) => {}
            None => self.dimension = Some(entry.dimension()),
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// The `min(k, len)` entries closest to `query`, best first.
    ///
    /// Equal distances keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<QueryResult>> {
        let expected = match self.dimension {
            Some(dim) if !self.entries.is_empty() => dim,
            _ => return Err(RetrievalError::EmptyIndex),
        };
        if query.len() != expected {
            return Err(RetrievalError::DimensionMismatch {
                expected,
                actual: query.len(),
                context: "query vector".to_string(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, distance(self.metric, query, &entry.vector)))
            .collect();
        // sort_by is stable, so ties stay in insertion order
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k.min(self.entries.len()));

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(rank, (i, distance))| QueryResult {
                rank: rank + 1,
                distance,
                chunk: self.entries[i].chunk.clone(),
            })
            .collect())
    }
}
