use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use ranker_core::loader::{load, load_document};
use ranker_core::{DocumentFormat, LoadError};
use std::fs;
use std::path::Path;

fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => count,
        "Kids" => kids,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn test_load_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alice.txt");
    fs::write(&path, "Rust engineer, 5 years of tokio.").unwrap();

    let doc = load_document(&path).unwrap();
    assert_eq!(doc.id, "alice.txt");
    assert_eq!(doc.format(), DocumentFormat::PlainText);
    assert_eq!(doc.text(), "Rust engineer, 5 years of tokio.");
    assert_eq!(doc.path.as_deref(), Some(path.as_path()));
}

#[test]
fn test_load_two_page_pdf_keeps_page_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bob.pdf");
    write_pdf(&path, &["Experience at Acme", "Education at MIT"]);

    let doc = load_document(&path).unwrap();
    assert_eq!(doc.id, "bob.pdf");
    assert_eq!(doc.format(), DocumentFormat::PageStructured);

    let text = doc.text();
    let first = text.find("Experience at Acme").expect("first page text");
    let second = text.find("Education at MIT").expect("second page text");
    assert!(first < second);
    assert!(text[first..second].contains("\n\n"));
}

#[test]
fn test_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();
    assert!(matches!(load_document(&path), Err(LoadError::Empty { .. })));

    let blank = dir.path().join("blank.txt");
    fs::write(&blank, "  \n\t ").unwrap();
    assert!(matches!(load_document(&blank), Err(LoadError::Empty { .. })));
}

#[test]
fn test_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(&path, [0x52, 0xe9, 0x73, 0x75, 0x6d, 0xe9]).unwrap();
    assert!(matches!(load_document(&path), Err(LoadError::InvalidUtf8 { .. })));
}

#[test]
fn test_corrupt_pdf_is_unparsable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    fs::write(&path, b"%PDF-1.4\nthis is not really a pdf").unwrap();
    assert!(matches!(load_document(&path), Err(LoadError::Unparsable { .. })));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carol.docx");
    fs::write(&path, "PK\u{3}\u{4}").unwrap();
    assert!(matches!(
        load_document(&path),
        Err(LoadError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ghost.txt");
    assert!(matches!(
        load(&path, DocumentFormat::PlainText),
        Err(LoadError::Io { .. })
    ));
}
