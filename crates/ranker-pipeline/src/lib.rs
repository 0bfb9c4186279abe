pub mod ingest;
pub mod retriever;

pub use ingest::{load_documents, load_query, LoadReport};
pub use retriever::{RetrievalSettings, Retriever};
