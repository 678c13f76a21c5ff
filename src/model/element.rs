//! Records produced by the extractors.

use serde::{Deserialize, Serialize};

/// A figure caption found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    /// Normalized identifier, e.g. `Figure 3b`
    pub id: String,

    /// Caption text following the identifier
    pub caption: String,

    /// Character offset of the caption line
    pub offset: usize,
}

impl Figure {
    /// Create a new figure record.
    pub fn new(id: impl Into<String>, caption: impl Into<String>, offset: usize) -> Self {
        Self {
            id: id.into(),
            caption: caption.into(),
            offset,
        }
    }
}

/// A table block found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Identifier, e.g. `Table 2`, or `unlabeled-N` for uncaptioned blocks
    pub id: String,

    /// Caption text, if the table was captioned
    pub caption: Option<String>,

    /// Raw cell/text block, one source line per line
    pub content: String,

    /// Character offset of the caption line or first row
    pub offset: usize,
}

impl Table {
    /// Prefix used for tables without a caption.
    pub const UNLABELED_PREFIX: &'static str = "unlabeled-";

    /// Create a captioned table record.
    pub fn captioned(
        id: impl Into<String>,
        caption: impl Into<String>,
        content: impl Into<String>,
        offset: usize,
    ) -> Self {
        Self {
            id: id.into(),
            caption: Some(caption.into()),
            content: content.into(),
            offset,
        }
    }

    /// Create an uncaptioned table record.
    ///
    /// The identifier is assigned once the whole document has been scanned.
    pub fn unlabeled(content: impl Into<String>, offset: usize) -> Self {
        Self {
            id: String::new(),
            caption: None,
            content: content.into(),
            offset,
        }
    }

    /// Check if the table came with a caption.
    pub fn is_captioned(&self) -> bool {
        self.caption.is_some()
    }

    /// Get the number of content rows.
    pub fn row_count(&self) -> usize {
        self.content.lines().filter(|l| !l.trim().is_empty()).count()
    }
}

/// How an equation was marked up in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquationStyle {
    /// `$$...$$`, `\[...\]` or an equation environment
    Display,
    /// `$...$` or `\(...\)`
    Inline,
    /// Undelimited `lhs = rhs` expression
    Bare,
}

/// An equation or equation-like expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    /// Expression text without delimiters
    pub expression: String,

    /// Markup style
    pub style: EquationStyle,

    /// Character offset of the expression (including delimiters)
    pub offset: usize,
}

impl Equation {
    /// Create a new equation record.
    pub fn new(expression: impl Into<String>, style: EquationStyle, offset: usize) -> Self {
        Self {
            expression: expression.into(),
            style,
            offset,
        }
    }
}

/// Citation marker style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationStyle {
    /// `[1]`, `[2, 4]`, `[3-7]`
    Numeric,
    /// `(Smith et al., 2020)`
    AuthorYear,
}

/// An in-text citation marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Raw marker text, brackets included
    pub text: String,

    /// Marker style
    pub style: CitationStyle,

    /// Character offset of the marker
    pub offset: usize,
}

impl Citation {
    /// Create a new citation record.
    pub fn new(text: impl Into<String>, style: CitationStyle, offset: usize) -> Self {
        Self {
            text: text.into(),
            style,
            offset,
        }
    }

    /// Reference numbers named by a numeric marker, with ranges expanded.
    ///
    /// Returns an empty list for author-year markers.
    pub fn reference_numbers(&self) -> Vec<u32> {
        if self.style != CitationStyle::Numeric {
            return Vec::new();
        }

        let inner = self.text.trim_start_matches('[').trim_end_matches(']');
        let mut numbers = Vec::new();
        for part in inner.split(',') {
            let part = part.trim();
            let bounds: Vec<&str> = part.split(['-', '–']).map(str::trim).collect();
            match bounds.as_slice() {
                [single] => {
                    if let Ok(n) = single.parse() {
                        numbers.push(n);
                    }
                }
                [start, end] => {
                    if let (Ok(start), Ok(end)) = (start.parse::<u32>(), end.parse::<u32>()) {
                        if start <= end {
                            numbers.extend(start..=end);
                        }
                    }
                }
                _ => {}
            }
        }
        numbers
    }
}
