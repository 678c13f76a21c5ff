//! Benchmarks for docsplit processing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic paper-like text.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docsplit::{chunk_text, DocumentProcessor, ProcessingConfig};

/// Creates a synthetic paper with the given number of sections.
fn create_test_paper(sections: usize) -> String {
    let mut text = String::new();

    for i in 1..=sections {
        text.push_str(&format!("{}. Section {}\n\n", i, i));
        for _ in 0..8 {
            text.push_str(
                "Sparse encoders reduce the cost of inference while keeping accuracy close to \
                 dense baselines across the evaluated benchmarks. ",
            );
        }
        text.push_str(&format!(
            "Prior work [{}] and (Lee et al., 2021) report similar trends, with y = {}x + 1.\n\n",
            i, i
        ));
        text.push_str(&format!("Figure {}: Ablation for section {}.\n\n", i, i));
        text.push_str(&format!(
            "Table {}: Scores.\nModel | Acc | F1\nBase | 0.81 | 0.77\nOurs | 0.90 | 0.86\n\n",
            i
        ));
        text.push_str("$$ \\mathcal{L} = \\sum_i \\ell(x_i, y_i) $$\n\n");
    }

    text
}

/// Benchmark chunking alone.
fn bench_chunking(c: &mut Criterion) {
    let text = create_test_paper(20);

    let mut group = c.benchmark_group("chunking");
    group.throughput(Throughput::Bytes(text.len() as u64));
    for max_length in [200, 1000, 4000] {
        group.bench_with_input(BenchmarkId::from_parameter(max_length), &max_length, |b, &n| {
            b.iter(|| chunk_text(black_box(&text), n).unwrap());
        });
    }
    group.finish();
}

/// Benchmark the full pipeline at various document sizes.
fn bench_processing(c: &mut Criterion) {
    let processor = DocumentProcessor::new(ProcessingConfig::default());

    let mut group = c.benchmark_group("processing");
    for sections in [1, 10, 50] {
        let text = create_test_paper(sections);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| processor.process_document(black_box(&text)).unwrap());
        });
    }
    group.finish();
}

/// Benchmark chunk-only processing against the full extractor set.
fn bench_chunks_only(c: &mut Criterion) {
    let text = create_test_paper(10);
    let config = ProcessingConfig::builder().chunks_only().build().unwrap();
    let processor = DocumentProcessor::new(config);

    c.bench_function("chunks_only_10_sections", |b| {
        b.iter(|| processor.process_document(black_box(&text)).unwrap());
    });
}

/// Benchmark processor construction (regex compilation).
fn bench_processor_creation(c: &mut Criterion) {
    c.bench_function("processor_creation", |b| {
        b.iter(|| DocumentProcessor::new(ProcessingConfig::default()));
    });
}

criterion_group!(
    benches,
    bench_chunking,
    bench_processing,
    bench_chunks_only,
    bench_processor_creation,
);
criterion_main!(benches);
