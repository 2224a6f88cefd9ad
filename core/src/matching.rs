//! Boundary-aware token matching and value patterns.
//!
//! A command name only matches when flanked by whitespace or the start/end of
//! the input, so `ping` never matches inside `pinging` and `-A` never matches
//! inside `-AB`.

use std::ops::Range;

use regex::Regex;

/// Byte ranges of every boundary-matched occurrence of `name` in `input`.
pub(crate) fn token_ranges(input: &str, name: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    if name.is_empty() {
        return ranges;
    }

    let mut from = 0;
    while let Some(offset) = input[from..].find(name) {
        let start = from + offset;
        let end = start + name.len();
        if boundary_before(input, start) && boundary_after(input, end) {
            ranges.push(start..end);
            from = end;
        } else {
            // retry one char later so overlapping candidates are not skipped
            from = start + input[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    ranges
}

/// First boundary-matched occurrence of `name`.
pub(crate) fn find_token(input: &str, name: &str) -> Option<Range<usize>> {
    token_ranges(input, name).into_iter().next()
}

pub(crate) fn contains_token(input: &str, name: &str) -> bool {
    find_token(input, name).is_some()
}

/// Returns `input` with the given non-overlapping, ascending ranges removed.
pub(crate) fn remove_ranges(input: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    for range in ranges {
        out.push_str(&input[cursor..range.start]);
        cursor = range.end;
    }
    out.push_str(&input[cursor..]);
    out
}

/// Removes every boundary-matched occurrence of `name`, leaving whitespace.
pub(crate) fn strip_token(input: &str, name: &str) -> String {
    remove_ranges(input, &token_ranges(input, name))
}

/// Text after byte offset `at` with leading whitespace skipped, plus the
/// absolute offset where that text begins.
pub(crate) fn following(input: &str, at: usize) -> (usize, &str) {
    let rest = &input[at..];
    let trimmed = rest.trim_start();
    (at + rest.len() - trimmed.len(), trimmed)
}

/// Whether `text` begins with `name` as a whole token.
pub(crate) fn starts_with_token(text: &str, name: &str) -> bool {
    !name.is_empty() && text.starts_with(name) && boundary_after(text, name.len())
}

fn boundary_before(input: &str, at: usize) -> bool {
    input[..at].chars().next_back().is_none_or(char::is_whitespace)
}

fn boundary_after(input: &str, at: usize) -> bool {
    input[at..].chars().next().is_none_or(char::is_whitespace)
}

/// Compiled value pattern.
///
/// Keeps two compiled forms of the same expression: one anchored at the start
/// of the text and required to end on a word boundary (used for validation),
/// and one that searches anywhere (used as a parse fallback for optional
/// values).
#[derive(Debug, Clone)]
pub struct ValuePattern {
    source: String,
    leading: Regex,
    anywhere: Regex,
}

impl ValuePattern {
    /// Compiles `source` as a value pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error when `source` is not a valid expression.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            leading: Regex::new(&format!(r"^(?:{source})\b"))?,
            anywhere: Regex::new(source)?,
        })
    }

    /// The expression as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Non-empty match at the very start of `text` that ends on a word
    /// boundary.
    pub(crate) fn leading_match(&self, text: &str) -> Option<Range<usize>> {
        self.leading
            .find(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
    }

    /// Leading match if there is one, else the first non-empty match anywhere.
    pub(crate) fn first_match(&self, text: &str) -> Option<Range<usize>> {
        self.leading_match(text).or_else(|| {
            self.anywhere
                .find_iter(text)
                .find(|m| !m.is_empty())
                .map(|m| m.range())
        })
    }
}
