//! Integration tests for byte, reader and file entry points.

use std::fs;
use std::io::Cursor;

use docsplit::{process_file, DocumentProcessor, Error, ProcessingConfig};
use tempfile::tempdir;

const PAPER: &str = "Abstract. We study sparse models.\n\n\
Figure 1: Training curves.\n\n\
As shown by (Kim et al., 2021), the loss L = 2x + 1 decreases.\n\n\
Table 1: Results.\nModel | F1\nOurs | 0.88\n";

#[test]
fn test_process_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paper.txt");
    fs::write(&path, PAPER).unwrap();

    let content = process_file(&path).unwrap();
    assert_eq!(content.figures.len(), 1);
    assert_eq!(content.tables.len(), 1);
    assert_eq!(content.citations.len(), 1);
    assert_eq!(content.equations.len(), 1);
}

#[test]
fn test_process_file_with_bom() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bom.txt");
    let mut data = b"\xEF\xBB\xBF".to_vec();
    data.extend_from_slice(PAPER.as_bytes());
    fs::write(&path, &data).unwrap();

    let with_bom = process_file(&path).unwrap();
    let without = docsplit::process_text(PAPER).unwrap();
    assert_eq!(with_bom, without);
    assert_eq!(with_bom.text_chunks[0].source_char_range.0, 0);
}

#[test]
fn test_process_file_missing() {
    let dir = tempdir().unwrap();
    let result = process_file(dir.path().join("absent.txt"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_process_file_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(&path, b"caf\xE9 au lait").unwrap();

    match process_file(&path) {
        Err(Error::Input { offset, .. }) => assert_eq!(offset, 3),
        other => panic!("expected input error, got {:?}", other),
    }
}

#[test]
fn test_process_reader() {
    let processor = DocumentProcessor::new(ProcessingConfig::default());
    let content = processor.process_reader(Cursor::new(PAPER.as_bytes())).unwrap();

    assert_eq!(content.figures[0].caption, "Training curves.");
    assert_eq!(processor.statistics().documents_processed, 1);
}

#[test]
fn test_process_bytes_matches_text() {
    let processor = DocumentProcessor::new(ProcessingConfig::default());
    let from_bytes = processor.process_bytes(PAPER.as_bytes()).unwrap();
    let from_text = processor.process_document(PAPER).unwrap();

    assert_eq!(from_bytes, from_text);
    assert_eq!(processor.statistics().documents_processed, 2);
}

#[test]
fn test_pdf_bytes_rejected() {
    let processor = DocumentProcessor::new(ProcessingConfig::default());
    let err = processor
        .process_bytes(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n1 0 obj")
        .unwrap_err();

    assert!(err.is_input_error());
    assert_eq!(processor.statistics().documents_processed, 0);
}

#[test]
fn test_text_starting_with_pdf_header_accepted() {
    let processor = DocumentProcessor::new(ProcessingConfig::default());
    let content = processor
        .process_bytes(b"%PDF-1.7 is the version discussed in this paper.")
        .unwrap();

    assert_eq!(content.text_chunks[0].text, "%PDF-1.7 is the version discussed in this paper.");
    assert_eq!(processor.statistics().documents_processed, 1);
}
