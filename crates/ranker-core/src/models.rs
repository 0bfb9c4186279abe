use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;

/// Pages of a paged document are joined with a blank line.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// One embedding per chunk (or per query text). Every vector produced by a
/// single embedder within a run has the same length.
pub type EmbeddingVector = Vec<f32>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// The whole file is the text
    PlainText,
    /// Text is extracted page by page (PDF)
    PageStructured,
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::PlainText => f.write_str("plain text"),
            DocumentFormat::PageStructured => f.write_str("paged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBody {
    Text(String),
    Pages(Vec<String>),
}

/// A candidate document as loaded from storage. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name or caller-provided logical id
    pub id: String,
    pub path: Option<PathBuf>,
    pub body: DocumentBody,
}

impl Document {
    pub fn plain_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
            body: DocumentBody::Text(text.into()),
        }
    }

    pub fn paged(id: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
            body: DocumentBody::Pages(pages),
        }
    }

    pub fn format(&self) -> DocumentFormat {
        match self.body {
            DocumentBody::Text(_) => DocumentFormat::PlainText,
            DocumentBody::Pages(_) => DocumentFormat::PageStructured,
        }
    }

    /// Concatenated text; page boundaries become [`PAGE_SEPARATOR`].
    pub fn text(&self) -> Cow<'_, str> {
        match &self.body {
            DocumentBody::Text(text) => Cow::Borrowed(text),
            DocumentBody::Pages(pages) => Cow::Owned(pages.join(PAGE_SEPARATOR)),
        }
    }

    pub fn is_blank(&self) -> bool {
        match &self.body {
            DocumentBody::Text(text) => text.trim().is_empty(),
            DocumentBody::Pages(pages) => pages.iter().all(|p| p.trim().is_empty()),
        }
    }
}

/// A contiguous window of a document's text; the unit of embedding and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub id: String,
    pub source_document_id: String,
    pub chunk_index: usize,
    /// Offset of the first character within the document text, in chars
    pub start_char: usize,
    /// Length in chars
    pub length: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub vector: EmbeddingVector,
}

impl IndexEntry {
    pub fn new(chunk: Chunk, vector: EmbeddingVector) -> Self {
        Self { chunk, vector }
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    /// 1-based, ascending distance
    pub rank: usize,
    pub distance: f32,
    pub chunk: Chunk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_text_joins_pages() {
        let doc = Document::paged("cv.pdf", vec!["first".to_string(), "second".to_string()]);
        assert_eq!(doc.format(), DocumentFormat::PageStructured);
        assert_eq!(doc.text(), "first\n\nsecond");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        let doc = Document::plain_text("cv.txt", "hello");
        assert!(matches!(doc.text(), Cow::Borrowed("hello")));
        assert!(!doc.is_blank());
        assert!(Document::paged("x", vec![" ".to_string(), "\n".to_string()]).is_blank());
    }
}
