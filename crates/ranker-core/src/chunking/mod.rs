pub mod window;

pub use window::SlidingWindow;

use crate::models::{Chunk, Document};

pub trait Segmenter {
    /// Split a document into chunks, in order of appearance.
    fn segment(&self, document: &Document) -> Vec<Chunk>;
}
