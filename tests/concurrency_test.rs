//! Tests for sharing one processor across threads.

use std::sync::Arc;
use std::thread;

use docsplit::{CancelFlag, DocumentProcessor, Error, ProcessingConfig};

fn document(i: usize) -> String {
    format!(
        "Figure {i}: Run {i}.\n\nSection {i} text cites [{i}] and (Lee, 2020).\n\nTable {i}: Data.\na | b\n{i} | 2"
    )
}

#[test]
fn test_concurrent_calls_count_every_document() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let processor = Arc::new(DocumentProcessor::new(ProcessingConfig::default()));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let processor = Arc::clone(&processor);
            thread::spawn(move || {
                let mut chunks = 0u64;
                for i in 0..PER_THREAD {
                    let content = processor
                        .process_document(&document(t * PER_THREAD + i + 1))
                        .unwrap();
                    chunks += content.text_chunks.len() as u64;
                }
                chunks
            })
        })
        .collect();

    let chunks: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let stats = processor.statistics();
    let total = (THREADS * PER_THREAD) as u64;

    assert_eq!(stats.documents_processed, total);
    assert_eq!(stats.chunks_created, chunks);
    assert_eq!(stats.figures_extracted, total);
    assert_eq!(stats.tables_extracted, total);
    assert_eq!(stats.citations_extracted, 2 * total);
}

#[test]
fn test_snapshots_never_decrease_under_load() {
    let processor = Arc::new(DocumentProcessor::new(ProcessingConfig::default()));

    let writer = {
        let processor = Arc::clone(&processor);
        thread::spawn(move || {
            for i in 1..=200 {
                processor.process_document(&document(i)).unwrap();
            }
        })
    };

    let mut previous = processor.statistics();
    while !writer.is_finished() {
        let current = processor.statistics();
        assert!(current.dominates(&previous));
        // Counters of one document move together.
        assert_eq!(current.figures_extracted, current.documents_processed);
        previous = current;
    }
    writer.join().unwrap();

    assert_eq!(processor.statistics().documents_processed, 200);
}

#[test]
fn test_process_batch() {
    let processor = DocumentProcessor::new(ProcessingConfig::default());
    let docs: Vec<String> = (1..=50).map(document).collect();

    let results = processor.process_batch(&docs);

    assert_eq!(results.len(), docs.len());
    for (i, result) in results.iter().enumerate() {
        let content = result.as_ref().unwrap();
        assert_eq!(content.figures[0].id, format!("Figure {}", i + 1));
    }
    assert_eq!(processor.statistics().documents_processed, 50);
}

#[test]
fn test_cancel_from_another_thread() {
    let processor = Arc::new(DocumentProcessor::new(ProcessingConfig::default()));
    let cancel = CancelFlag::new();

    let remote = cancel.clone();
    thread::spawn(move || remote.cancel()).join().unwrap();

    let result = processor.process_document_cancellable(&document(1), &cancel);
    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(processor.statistics().documents_processed, 0);
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread")]
async fn test_process_document_async() {
    let processor = Arc::new(DocumentProcessor::new(ProcessingConfig::default()));

    let tasks: Vec<_> = (1..=10)
        .map(|i| tokio::spawn(Arc::clone(&processor).process_document_async(document(i))))
        .collect();
    for task in tasks {
        let content = task.await.unwrap().unwrap();
        assert_eq!(content.tables.len(), 1);
    }

    assert_eq!(processor.statistics().documents_processed, 10);
}
