//! Property-style tests for chunking.
//!
//! Inputs come from a small seeded generator so every run sees the same
//! documents.

use docsplit::{chunk_text, Chunker};

/// xorshift64 generator.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

const ALPHABET: [char; 12] = ['a', 'b', 'z', 'é', 'ß', 'ж', '中', '7', '.', ',', '(', '¶'];
const SEPARATORS: [&str; 6] = [" ", "  ", "\n", "\n\n", "\t", "\u{3000}"];

fn random_document(rng: &mut Rng) -> String {
    let tokens = rng.below(120);
    let mut text = String::new();
    if rng.below(2) == 0 {
        text.push_str(SEPARATORS[rng.below(SEPARATORS.len())]);
    }
    for _ in 0..tokens {
        let cap = if rng.below(10) == 0 { 40 } else { 9 };
        let len = 1 + rng.below(cap);
        for _ in 0..len {
            text.push(ALPHABET[rng.below(ALPHABET.len())]);
        }
        text.push_str(SEPARATORS[rng.below(SEPARATORS.len())]);
    }
    text
}

#[test]
fn test_chunks_preserve_token_sequence() {
    let mut rng = Rng(0x9E37_79B9_7F4A_7C15);

    for _ in 0..200 {
        let text = random_document(&mut rng);
        let max_length = 1 + rng.below(60);
        let chunks = chunk_text(&text, max_length).unwrap();

        let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.split_whitespace()).collect();
        let source: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, source, "max_length {}", max_length);
    }
}

#[test]
fn test_chunks_respect_max_length() {
    let mut rng = Rng(42);

    for _ in 0..200 {
        let text = random_document(&mut rng);
        let max_length = 1 + rng.below(60);

        for chunk in chunk_text(&text, max_length).unwrap() {
            let len = chunk.chars().count();
            let single_token = !chunk.contains(' ');
            assert!(
                len <= max_length || single_token,
                "chunk {:?} exceeds {}",
                chunk,
                max_length
            );
            assert!(!chunk.is_empty());
        }
    }
}

#[test]
fn test_chunks_are_greedy() {
    let mut rng = Rng(7);

    for _ in 0..200 {
        let text = random_document(&mut rng);
        let max_length = 1 + rng.below(60);
        let chunks = chunk_text(&text, max_length).unwrap();

        for pair in chunks.windows(2) {
            let next_token = pair[1].split(' ').next().unwrap_or_default();
            let joined = pair[0].chars().count() + 1 + next_token.chars().count();
            assert!(joined > max_length, "{:?} could take {:?}", pair[0], next_token);
        }
    }
}

#[test]
fn test_whitespace_only_yields_nothing() {
    let mut rng = Rng(1234);

    for _ in 0..50 {
        let mut text = String::new();
        for _ in 0..rng.below(20) {
            text.push_str(SEPARATORS[rng.below(SEPARATORS.len())]);
        }
        assert!(chunk_text(&text, 1 + rng.below(10)).unwrap().is_empty());
    }
}

#[test]
fn test_offsets_are_ordered_and_exact() {
    let mut rng = Rng(2024);

    for _ in 0..100 {
        let text = random_document(&mut rng);
        let chars: Vec<char> = text.chars().collect();
        let chunker = Chunker::new(1 + rng.below(30)).unwrap();
        let chunks = chunker.chunk_with_offsets(&text);

        let mut last_end = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            let (start, end) = chunk.source_char_range;
            assert_eq!(chunk.index, i);
            assert!(start >= last_end && start < end && end <= chars.len());

            let span: String = chars[start..end].iter().collect();
            let normalized = span.split_whitespace().collect::<Vec<_>>().join(" ");
            assert_eq!(normalized, chunk.text);
            last_end = end;
        }
    }
}

#[test]
fn test_chunker_matches_convenience() {
    let text = "Results in Table 2 improve on [3] by 4.1 points.";
    let chunker = Chunker::new(16).unwrap();
    assert_eq!(chunker.chunk(text), chunk_text(text, 16).unwrap());
    assert_eq!(chunker.max_length(), 16);
}
