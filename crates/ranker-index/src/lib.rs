pub mod metric;
pub mod vector;

pub use metric::{cosine_distance, euclidean_distance, DistanceMetric};
pub use vector::VectorIndex;
