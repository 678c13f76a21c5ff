//! Equation extraction.

use regex::Regex;

use super::{normalize_text, Extractor, ExtractorKind, OffsetMapper};
use crate::budget::Window;
use crate::model::{Equation, EquationStyle};

/// LaTeX environments treated as display math.
const DISPLAY_ENVIRONMENTS: [&str; 5] = ["equation", "align", "gather", "multline", "eqnarray"];

/// One operand of a bare left-hand side: `x`, `2x`, `3.5`, `α`, `f(x)`,
/// optionally followed by sub- or superscripts (`x_i`, `y^{2}`).
const BARE_TERM: &str = r"(?:\d+(?:\.\d+)?\p{L}?|\p{L}[\p{L}\p{N}]{0,2})(?:\([^()=\r\n]{1,20}\))?(?:[_^]\{?[\p{L}\p{N}]+\}?){0,2}";

/// Characters of a bare right-hand side operand.
const BARE_OPERAND: &str = r"[\p{L}\p{N}_^{}()+\-*/.\\]+";

/// Trailing characters that mark an unfinished `$...$` body.
const OPERATORS: &str = "+-*/=^_";

/// Finds delimited math and bare `lhs = rhs` expressions.
#[derive(Debug, Clone)]
pub struct EquationExtractor {
    delimited_regex: Regex,
    /// Capture groups `1..=display_groups` hold display math bodies.
    display_groups: usize,
    bare_regex: Regex,
}

impl EquationExtractor {
    /// Create a new equation extractor.
    pub fn new() -> Self {
        let mut display = vec![r"\$\$(.+?)\$\$".to_string(), r"\\\[(.+?)\\\]".to_string()];
        for env in DISPLAY_ENVIRONMENTS {
            display.push(format!(r"\\begin\{{{env}\*?\}}(.+?)\\end\{{{env}\*?\}}"));
        }
        let display_groups = display.len();
        // The `$...$` body must be the first inline group.
        let inline = [
            r"\$([^\s$](?:[^$\n]*[^\s$])?)\$",
            r"\\\((.+?)\\\)",
        ];
        let pattern = format!(
            "(?s){}|{}",
            display.join("|"),
            inline.join("|")
        );

        let lhs = format!(r"{BARE_TERM}(?:[ \t]*[+\-*/][ \t]*{BARE_TERM})*");
        let rhs = format!(r"{BARE_OPERAND}(?:[ \t]*[+\-*/^][ \t]*{BARE_OPERAND})*");

        Self {
            delimited_regex: Regex::new(&pattern).expect("delimited math pattern is valid"),
            display_groups,
            bare_regex: Regex::new(&format!(
                r"\b(?P<lhs>{lhs})[ \t]*=[ \t]*(?P<rhs>{rhs})"
            ))
            .expect("bare equation pattern is valid"),
        }
    }

    /// Delimited matches as `(byte_start, byte_end, body, style)`.
    fn delimited<'t>(&self, text: &'t str) -> Vec<(usize, usize, &'t str, EquationStyle)> {
        self.delimited_regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let (group, body) = caps
                    .iter()
                    .enumerate()
                    .skip(1)
                    .find_map(|(i, m)| m.map(|m| (i, m)))?;
                // `$5-$10` is a price range, not math.
                if group == self.display_groups + 1
                    && (text[whole.end()..].starts_with(|c: char| c.is_ascii_digit())
                        || body.as_str().ends_with(|c: char| OPERATORS.contains(c)))
                {
                    return None;
                }
                let style = if group <= self.display_groups {
                    EquationStyle::Display
                } else {
                    EquationStyle::Inline
                };
                Some((whole.start(), whole.end(), body.as_str(), style))
            })
            .collect()
    }

    /// Bare expressions outside any delimited span, as `(byte_start, expression)`.
    fn bare<'t>(&self, text: &'t str, delimited: &[(usize, usize)]) -> Vec<(usize, &'t str)> {
        self.bare_regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let rhs = caps.name("rhs")?.as_str();
                if !rhs.chars().any(|c| c.is_ascii_digit() || "+-*/^".contains(c)) {
                    return None;
                }
                // Query-string style `?id=3` is not math.
                if text[..whole.start()]
                    .chars()
                    .next_back()
                    .is_some_and(|c| "?&/=<>!".contains(c))
                {
                    return None;
                }
                if delimited
                    .iter()
                    .any(|&(s, e)| whole.start() < e && s < whole.end())
                {
                    return None;
                }
                let expression = whole.as_str().trim_end_matches(['.', ',']);
                Some((whole.start(), expression))
            })
            .collect()
    }
}

impl Default for EquationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for EquationExtractor {
    type Record = Equation;

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Equation
    }

    fn scan(&self, window: &Window<'_>) -> Vec<Equation> {
        let delimited = self.delimited(window.text);
        let spans: Vec<(usize, usize)> = delimited.iter().map(|&(s, e, _, _)| (s, e)).collect();

        let mut found: Vec<(usize, String, EquationStyle)> = delimited
            .into_iter()
            .map(|(start, _, body, style)| (start, normalize_text(body), style))
            .filter(|(_, body, _)| !body.is_empty())
            .collect();
        found.extend(
            self.bare(window.text, &spans)
                .into_iter()
                .map(|(start, expr)| (start, normalize_text(expr), EquationStyle::Bare)),
        );
        found.sort_by_key(|(start, _, _)| *start);

        let mut mapper = OffsetMapper::new(window);
        found
            .into_iter()
            .map(|(start, expression, style)| {
                Equation::new(expression, style, mapper.char_offset(start))
            })
            .collect()
    }
}
