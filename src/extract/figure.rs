//! Figure caption extraction.

use regex::Regex;

use super::{normalize_text, Extractor, ExtractorKind, OffsetMapper};
use crate::budget::Window;
use crate::model::Figure;

/// Finds figure captions: lines opening with `Figure N:` or `Fig. N.`.
///
/// In-text references such as "as shown in Figure 2" are not captions and
/// are ignored.
#[derive(Debug, Clone)]
pub struct FigureExtractor {
    caption_regex: Regex,
}

impl FigureExtractor {
    /// Create a new figure extractor.
    pub fn new() -> Self {
        Self {
            caption_regex: Regex::new(
                r"(?m)^[ \t]*(?P<label>(?:Figure|FIGURE|Fig\.|FIG\.|Fig|FIG)[ \t]*(?P<num>\d+[a-zA-Z]?))[ \t]*[:.|][ \t]*(?P<caption>\S[^\r\n]*)",
            )
            .expect("figure caption pattern is valid"),
        }
    }
}

impl Default for FigureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for FigureExtractor {
    type Record = Figure;

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Figure
    }

    fn scan(&self, window: &Window<'_>) -> Vec<Figure> {
        let mut mapper = OffsetMapper::new(window);

        self.caption_regex
            .captures_iter(window.text)
            .filter_map(|caps| {
                let label = caps.name("label")?;
                let num = caps.name("num")?.as_str();
                let caption = normalize_text(caps.name("caption")?.as_str());
                Some(Figure::new(
                    format!("Figure {}", num),
                    caption,
                    mapper.char_offset(label.start()),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Figure> {
        FigureExtractor::new().scan(&Window::whole(text))
    }

    #[test]
    fn test_caption_forms() {
        let text = "Figure 1: Overview of the model.\n  Fig. 2b. Ablation   results.\nFIG 3 | Loss curve\n";
        let figures = scan(text);

        assert_eq!(figures.len(), 3);
        assert_eq!(figures[0].id, "Figure 1");
        assert_eq!(figures[0].caption, "Overview of the model.");
        assert_eq!(figures[0].offset, 0);
        assert_eq!(figures[1].id, "Figure 2b");
        assert_eq!(figures[1].caption, "Ablation results.");
        assert_eq!(figures[1].offset, 35);
        assert_eq!(figures[2].id, "Figure 3");
    }

    #[test]
    fn test_in_text_references_ignored() {
        let text = "As shown in Figure 4, the loss drops. See Fig. 5 for details.";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_offsets_are_rebased() {
        let text = "é\nFigure 7: Late figure.";
        let window = Window {
            text,
            byte_start: 40,
            char_start: 30,
        };
        let figures = FigureExtractor::new().scan(&window);
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0].offset, 32);
    }
}
