pub mod embedder;
pub mod local;

pub use embedder::select_embedder;
pub use local::LocalEmbedder;
