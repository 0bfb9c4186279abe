use super::Segmenter;
use crate::error::{Result, RetrievalError};
use crate::models::{Chunk, Document};
use sha2::{Digest, Sha256};

/// Fixed-size character windows with a fixed overlap.
///
/// The window start advances by `chunk_size - overlap` characters. The last
/// window is whatever remains once the window reaches the end of the text, so
/// it can be shorter than `chunk_size`. Windows never split a UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindow {
    chunk_size: usize,
    overlap: usize,
}

impl SlidingWindow {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RetrievalError::InvalidParameter {
                name: "chunk_size",
                message: "must be > 0".to_string(),
            });
        }
        if overlap >= chunk_size {
            return Err(RetrievalError::InvalidParameter {
                name: "chunk_overlap",
                message: format!("{} must be < chunk_size ({})", overlap, chunk_size),
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// `(start_char, window)` pairs over `text`.
    pub fn windows<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)> {
        // Byte offset of every char start, plus the end of the text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let total = boundaries.len() - 1;
        if total == 0 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(total / self.step() + 1);
        let mut start = 0;
        loop {
            let end = (start + self.chunk_size).min(total);
            out.push((start, &text[boundaries[start]..boundaries[end]]));
            if end == total {
                break;
            }
            start += self.step();
        }
        out
    }
}

impl Segmenter for SlidingWindow {
    fn segment(&self, document: &Document) -> Vec<Chunk> {
        let text = document.text();
        self.windows(&text)
            .into_iter()
            .enumerate()
            .map(|(index, (start_char, window))| {
                make_chunk(&document.id, index, start_char, window)
            })
            .collect()
    }
}

fn make_chunk(document_id: &str, index: usize, start_char: usize, text: &str) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(document_id.as_bytes());
    hasher.update(index.to_le_bytes());
    hasher.update(text.as_bytes());
    let hash = hex::encode(hasher.finalize());

    Chunk {
        id: hash[..16].to_string(),
        source_document_id: document_id.to_string(),
        chunk_index: index,
        start_char,
        length: text.chars().count(),
        text: text.to_string(),
    }
}
