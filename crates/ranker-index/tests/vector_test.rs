use pretty_assertions::assert_eq;
use ranker_core::{Chunk, IndexEntry, RetrievalError};
use ranker_index::{DistanceMetric, VectorIndex};

fn entry(doc: &str, index: usize, vector: Vec<f32>) -> IndexEntry {
    let text = format!("{doc} chunk {index}");
    IndexEntry::new(
        Chunk {
            id: format!("{doc}-{index}"),
            source_document_id: doc.to_string(),
            chunk_index: index,
            start_char: 0,
            length: text.chars().count(),
            text,
        },
        vector,
    )
}

fn five_entries() -> Vec<IndexEntry> {
    vec![
        entry("a", 0, vec![1.0, 0.0, 0.0]),
        entry("b", 0, vec![0.0, 1.0, 0.0]),
        entry("c", 0, vec![0.0, 0.0, 1.0]),
        entry("d", 0, vec![1.0, 1.0, 0.0]),
        entry("e", 0, vec![0.2, 0.3, 0.9]),
    ]
}

#[test]
fn test_exact_match_is_first_with_zero_distance() {
    for metric in [DistanceMetric::Cosine, DistanceMetric::Euclidean] {
        let index = VectorIndex::build(metric, five_entries()).unwrap();
        let results = index.search(&[0.2, 0.3, 0.9], 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.id, "e-0");
        assert_eq!(results[0].rank, 1);
        assert!(results[0].distance.abs() < 1e-6, "{metric}: {}", results[0].distance);
    }
}

#[test]
fn test_k_larger_than_index_returns_all_ranked() {
    let index = VectorIndex::build(DistanceMetric::Cosine, five_entries()).unwrap();
    let results = index.search(&[1.0, 0.1, 0.0], 50).unwrap();
    assert_eq!(results.len(), 5);
    let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert_eq!(results[0].chunk.id, "a-0");
}

#[test]
fn test_ties_keep_insertion_order() {
    let entries = vec![
        entry("x", 0, vec![0.0, 1.0]),
        entry("first", 0, vec![1.0, 0.0]),
        entry("second", 0, vec![2.0, 0.0]),
        entry("third", 0, vec![3.0, 0.0]),
    ];
    let index = VectorIndex::build(DistanceMetric::Cosine, entries).unwrap();
    let results = index.search(&[1.0, 0.0], 3).unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.chunk.source_document_id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_query_dimension_mismatch() {
    let index = VectorIndex::build(DistanceMetric::Cosine, five_entries()).unwrap();
    match index.search(&[1.0, 0.0], 1) {
        Err(RetrievalError::DimensionMismatch { expected, actual, .. }) => {
            assert_eq!((expected, actual), (3, 2));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

#[test]
fn test_entry_dimension_mismatch_on_build() {
    let entries = vec![entry("a", 0, vec![1.0, 0.0]), entry("b", 0, vec![1.0, 0.0, 0.0])];
    assert!(matches!(
        VectorIndex::build(DistanceMetric::Cosine, entries),
        Err(RetrievalError::DimensionMismatch { expected: 2, actual: 3, .. })
    ));
}

#[test]
fn test_empty_index_fails_at_query_time() {
    let index = VectorIndex::build(DistanceMetric::Cosine, Vec::new()).unwrap();
    assert!(index.is_empty());
    assert!(matches!(
        index.search(&[1.0], 3),
        Err(RetrievalError::EmptyIndex)
    ));
}

#[test]
fn test_k_zero_returns_nothing() {
    let index = VectorIndex::build(DistanceMetric::Cosine, five_entries()).unwrap();
    assert!(index.search(&[1.0, 0.0, 0.0], 0).unwrap().is_empty());
}
