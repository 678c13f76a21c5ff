//! Table extraction.
//!
//! Two shapes are recognized:
//!
//! - a caption line (`Table 2: Results`) followed by its body: the
//!   contiguous delimited rows when the body starts with one, otherwise
//!   the contiguous non-blank lines;
//! - an uncaptioned block of at least [`MIN_UNLABELED_ROWS`] consecutive
//!   delimited rows (pipe- or tab-separated, two or more non-empty cells).

use regex::Regex;

use super::{normalize_text, Extractor, ExtractorKind, OffsetMapper};
use crate::budget::Window;
use crate::model::Table;

/// Minimum number of delimited rows for an uncaptioned table.
pub const MIN_UNLABELED_ROWS: usize = 2;

/// Finds captioned and delimited tables.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    caption_regex: Regex,
}

impl TableExtractor {
    /// Create a new table extractor.
    pub fn new() -> Self {
        Self {
            caption_regex: Regex::new(
                r"^[ \t]*(?P<label>(?:Table|TABLE)[ \t]+(?P<num>\d+[a-zA-Z]?|[IVXLC]+))[ \t]*[:.][ \t]*(?P<caption>[^\r\n]*)",
            )
            .expect("table caption pattern is valid"),
        }
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for TableExtractor {
    type Record = Table;

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Table
    }

    fn scan(&self, window: &Window<'_>) -> Vec<Table> {
        let lines = lines_with_offsets(window.text);
        let mut mapper = OffsetMapper::new(window);
        let mut tables = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let (start, line) = lines[i];

            if let Some(caps) = self.caption_regex.captures(line) {
                let (label, num, caption) = match (caps.name("label"), caps.name("num")) {
                    (Some(label), Some(num)) => (
                        label,
                        num.as_str(),
                        caps.name("caption").map_or(String::new(), |m| normalize_text(m.as_str())),
                    ),
                    _ => {
                        i += 1;
                        continue;
                    }
                };

                let mut body_start = i + 1;
                // Allow one blank line between caption and a delimited body.
                if body_start + 1 < lines.len()
                    && is_blank(lines[body_start].1)
                    && is_delimited_row(lines[body_start + 1].1)
                {
                    body_start += 1;
                }
                // A delimited body ends at its first non-delimited line.
                let delimited_body =
                    body_start < lines.len() && is_delimited_row(lines[body_start].1);
                let mut end = body_start;
                while end < lines.len()
                    && !is_blank(lines[end].1)
                    && (!delimited_body || is_delimited_row(lines[end].1))
                {
                    end += 1;
                }

                tables.push(Table::captioned(
                    format!("Table {}", num),
                    caption,
                    join_lines(&lines[body_start..end]),
                    mapper.char_offset(start + label.start()),
                ));
                i = end.max(i + 1);
                continue;
            }

            if is_delimited_row(line) {
                let mut end = i + 1;
                while end < lines.len() && is_delimited_row(lines[end].1) {
                    end += 1;
                }
                if end - i >= MIN_UNLABELED_ROWS {
                    let indent = line.len() - line.trim_start().len();
                    tables.push(Table::unlabeled(
                        join_lines(&lines[i..end]),
                        mapper.char_offset(start + indent),
                    ));
                    i = end;
                    continue;
                }
            }

            i += 1;
        }

        tables
    }
}

/// Give uncaptioned tables document-wide `unlabeled-N` identifiers.
pub(crate) fn number_unlabeled_tables(tables: &mut [Table]) {
    for (n, table) in tables.iter_mut().filter(|t| !t.is_captioned()).enumerate() {
        table.id = format!("{}{}", Table::UNLABELED_PREFIX, n + 1);
    }
}

fn lines_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line)
        })
        .collect()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_delimited_row(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }
    let cells = |sep: char| line.split(sep).filter(|c| !c.trim().is_empty()).count();
    (line.contains('|') && cells('|') >= 2) || (line.contains('\t') && cells('\t') >= 2)
}

fn join_lines(lines: &[(usize, &str)]) -> String {
    lines
        .iter()
        .map(|(_, l)| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
