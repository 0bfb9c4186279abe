pub mod chunking;
pub mod error;
pub mod llm;
pub mod loader;
pub mod models;
pub mod scanner;
pub mod traits;

pub use error::{LoadError, Result, RetrievalError};
pub use models::{Chunk, Document, DocumentFormat, EmbeddingVector, IndexEntry, QueryResult};
