//! Human-readable summary of extracted content.

use crate::model::{CitationStyle, EquationStyle, ExtractedContent};

/// Longest preview of a chunk, caption or expression, in characters.
const PREVIEW_CHARS: usize = 60;

/// Render a short plain-text report of what was extracted.
///
/// One line per record, grouped by kind, with char offsets into the source.
pub fn to_summary(content: &ExtractedContent) -> String {
    let mut output = String::new();
    let words: usize = content.text_chunks.iter().map(|c| c.word_count()).sum();

    output.push_str(&format!(
        "Chunks: {} ({} words)\n",
        content.text_chunks.len(),
        words
    ));
    if let Some(first) = content.text_chunks.first() {
        output.push_str(&format!("  first: {}\n", preview(&first.text)));
    }

    output.push_str(&format!("Figures: {}\n", content.figures.len()));
    for figure in &content.figures {
        output.push_str(&format!(
            "  - {} @{}: {}\n",
            figure.id,
            figure.offset,
            preview(&figure.caption)
        ));
    }

    output.push_str(&format!("Tables: {}\n", content.tables.len()));
    for table in &content.tables {
        let rows = table.row_count();
        match &table.caption {
            Some(caption) => output.push_str(&format!(
                "  - {} @{}: {} ({} rows)\n",
                table.id,
                table.offset,
                preview(caption),
                rows
            )),
            None => output.push_str(&format!(
                "  - {} @{} ({} rows)\n",
                table.id, table.offset, rows
            )),
        }
    }

    output.push_str(&format!("Equations: {}\n", content.equations.len()));
    for equation in &content.equations {
        let style = match equation.style {
            EquationStyle::Display => "display",
            EquationStyle::Inline => "inline",
            EquationStyle::Bare => "bare",
        };
        output.push_str(&format!(
            "  - [{}] @{}: {}\n",
            style,
            equation.offset,
            preview(&equation.expression)
        ));
    }

    output.push_str(&format!("Citations: {}\n", content.citations.len()));
    for citation in &content.citations {
        let style = match citation.style {
            CitationStyle::Numeric => "numeric",
            CitationStyle::AuthorYear => "author-year",
        };
        output.push_str(&format!(
            "  - [{}] @{}: {}\n",
            style, citation.offset, citation.text
        ));
    }

    output
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Citation, Equation, Figure, Table, TextChunk};

    #[test]
    fn test_empty_summary() {
        let summary = to_summary(&ExtractedContent::new());
        assert!(summary.contains("Chunks: 0 (0 words)"));
        assert!(summary.contains("Figures: 0"));
        assert!(summary.contains("Citations: 0"));
        assert!(!summary.contains("first:"));
    }

    #[test]
    fn test_summary_lists_records() {
        let mut content = ExtractedContent::new();
        content.text_chunks.push(TextChunk {
            text: "Deep models generalize".to_string(),
            index: 0,
            source_char_range: (0, 22),
        });
        content.figures.push(Figure::new("Figure 2", "Loss curves.", 40));
        content.tables.push(Table::captioned("Table 1", "Scores.", "a | b\n1 | 2", 60));
        content.tables.push(Table {
            id: "unlabeled-1".to_string(),
            ..Table::unlabeled("x\ty\n1\t2", 90)
        });
        content
            .equations
            .push(Equation::new("E = mc^2", EquationStyle::Bare, 5));
        content
            .citations
            .push(Citation::new("[4]", CitationStyle::Numeric, 12));

        let summary = to_summary(&content);
        assert!(summary.contains("Chunks: 1 (3 words)"));
        assert!(summary.contains("  - Figure 2 @40: Loss curves."));
        assert!(summary.contains("  - Table 1 @60: Scores. (2 rows)"));
        assert!(summary.contains("  - unlabeled-1 @90 (2 rows)"));
        assert!(summary.contains("  - [bare] @5: E = mc^2"));
        assert!(summary.contains("  - [numeric] @12: [4]"));
    }

    #[test]
    fn test_summary_layout() {
        let mut content = ExtractedContent::new();
        content
            .citations
            .push(Citation::new("(Kim, 2021)", CitationStyle::AuthorYear, 3));

        assert_eq!(
            to_summary(&content),
            "Chunks: 0 (0 words)\nFigures: 0\nTables: 0\nEquations: 0\nCitations: 1\n  - [author-year] @3: (Kim, 2021)\n"
        );
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(PREVIEW_CHARS + 5);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
