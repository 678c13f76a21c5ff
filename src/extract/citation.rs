//! Citation marker extraction.

use regex::Regex;

use super::{normalize_text, Extractor, ExtractorKind, OffsetMapper};
use crate::budget::Window;
use crate::model::{Citation, CitationStyle};

const AUTHOR: &str = r"[A-Z][\p{L}'’\-]+(?:\s+(?:et\s+al\.?|and|&)(?:\s+[A-Z][\p{L}'’\-]+)?)?";
const YEAR: &str = r",?\s+(?:19|20)\d{2}[a-z]?";

/// Finds numeric (`[3]`, `[1, 4-6]`) and author-year (`(Lee et al., 2021)`)
/// citation markers.
#[derive(Debug, Clone)]
pub struct CitationExtractor {
    numeric_regex: Regex,
    author_year_regex: Regex,
}

impl CitationExtractor {
    /// Create a new citation extractor.
    pub fn new() -> Self {
        let entry = format!("{AUTHOR}{YEAR}");
        Self {
            numeric_regex: Regex::new(r"\[\d{1,4}(?:\s*[-–,]\s*\d{1,4})*\]")
                .expect("numeric citation pattern is valid"),
            author_year_regex: Regex::new(&format!(
                r"\((?:(?:see|e\.g\.,|cf\.)\s+)?{entry}(?:;\s*{entry})*\)"
            ))
            .expect("author-year citation pattern is valid"),
        }
    }
}

impl Default for CitationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for CitationExtractor {
    type Record = Citation;

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Citation
    }

    fn scan(&self, window: &Window<'_>) -> Vec<Citation> {
        let mut found: Vec<(usize, &str, CitationStyle)> = self
            .numeric_regex
            .find_iter(window.text)
            .map(|m| (m.start(), m.as_str(), CitationStyle::Numeric))
            .collect();
        found.extend(
            self.author_year_regex
                .find_iter(window.text)
                .map(|m| (m.start(), m.as_str(), CitationStyle::AuthorYear)),
        );
        found.sort_by_key(|(start, _, _)| *start);

        let mut mapper = OffsetMapper::new(window);
        found
            .into_iter()
            .map(|(start, text, style)| {
                Citation::new(normalize_text(text), style, mapper.char_offset(start))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Citation> {
        CitationExtractor::new().scan(&Window::whole(text))
    }

    #[test]
    fn test_numeric_markers() {
        let cites = scan("Prior work [1] and [2, 5] as well as [7-9].");
        let texts: Vec<&str> = cites.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["[1]", "[2, 5]", "[7-9]"]);
        assert!(cites.iter().all(|c| c.style == CitationStyle::Numeric));
        assert_eq!(cites[0].offset, 11);
    }

    #[test]
    fn test_author_year_markers() {
        let text = "This was shown (Smith et al., 2020) and disputed (Lee and Park 2019; Kim, 2021a).";
        let cites = scan(text);

        assert_eq!(cites.len(), 2);
        assert_eq!(cites[0].text, "(Smith et al., 2020)");
        assert_eq!(cites[0].style, CitationStyle::AuthorYear);
        assert_eq!(cites[1].text, "(Lee and Park 2019; Kim, 2021a)");
    }

    #[test]
    fn test_non_citations_ignored() {
        let text = "An array a[i] with (see below) and (in 2020) plus [x] and (Figure 3).";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_mixed_styles_sorted() {
        let cites = scan("(Doe, 2018) then [4].");
        assert_eq!(cites.len(), 2);
        assert_eq!(cites[0].style, CitationStyle::AuthorYear);
        assert_eq!(cites[1].style, CitationStyle::Numeric);
        assert_eq!(cites[1].offset, 17);
    }
}
