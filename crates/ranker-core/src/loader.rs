//! Reads candidate documents from disk into [`Document`]s.
//!
//! The format is resolved once per file, from the leading bytes first and the
//! extension second, and each format knows how to extract its own text.

use crate::error::LoadError;
use crate::models::{Document, DocumentBody, DocumentFormat};
use std::fs;
use std::path::Path;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

impl DocumentFormat {
    /// Resolve the format from the file's leading bytes and its extension.
    ///
    /// Returns `None` for extensions that are neither text nor PDF.
    pub fn detect(path: &Path, head: &[u8]) -> Option<Self> {
        if head.starts_with(PDF_MAGIC) {
            return Some(DocumentFormat::PageStructured);
        }
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => Some(DocumentFormat::PageStructured),
            Some("txt") | Some("text") | Some("md") | None => Some(DocumentFormat::PlainText),
            Some(_) => None,
        }
    }

    /// Extract the body of an already-read file.
    pub fn extract(&self, path: &Path, bytes: Vec<u8>) -> Result<DocumentBody, LoadError> {
        match self {
            DocumentFormat::PlainText => extract_plain_text(path, bytes),
            DocumentFormat::PageStructured => extract_pages(path, &bytes),
        }
    }
}

/// Load a document, detecting its format.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let bytes = read_bytes(path)?;
    let format =
        DocumentFormat::detect(path, &bytes).ok_or_else(|| LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    build_document(path, format, bytes)
}

/// Load a document whose format is already known.
pub fn load(path: &Path, format: DocumentFormat) -> Result<Document, LoadError> {
    let bytes = read_bytes(path)?;
    build_document(path, format, bytes)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(bytes)
}

fn build_document(
    path: &Path,
    format: DocumentFormat,
    bytes: Vec<u8>,
) -> Result<Document, LoadError> {
    let body = format.extract(path, bytes)?;
    let id = document_id(path);
    let document = Document {
        id,
        path: Some(path.to_path_buf()),
        body,
    };
    if document.is_blank() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    debug!(
        "Loaded {} ({}, {} chars)",
        document.id,
        format,
        document.text().chars().count()
    );
    Ok(document)
}

/// File name, falling back to the full path for paths without one.
pub fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn extract_plain_text(path: &Path, bytes: Vec<u8>) -> Result<DocumentBody, LoadError> {
    let text = String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;
    Ok(DocumentBody::Text(text))
}

fn extract_pages(path: &Path, bytes: &[u8]) -> Result<DocumentBody, LoadError> {
    let unparsable = |message: String| LoadError::Unparsable {
        path: path.to_path_buf(),
        message,
    };

    let doc = lopdf::Document::load_mem(bytes).map_err(|e| unparsable(e.to_string()))?;

    // BTreeMap keyed by page number, so iteration is already in page order
    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        let text = doc
            .extract_text(&[*page_number])
            .map_err(|e| unparsable(format!("page {}: {}", page_number, e)))?;
        pages.push(text.trim().to_string());
    }

    if pages.is_empty() {
        return Err(unparsable("document has no pages".to_string()));
    }

    Ok(DocumentBody::Pages(pages))
}
