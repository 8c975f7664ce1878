//! Text span, range and edit types for source location tracking.
//!
//! Positions are byte offsets into UTF-8 source text. Rewrites are expressed
//! as [`TextChange`]s against a snapshot and applied in one pass, so the
//! untouched parts of a file are copied through byte-for-byte.

use std::fmt;
use std::ops::Range;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The byte offset where this span starts.
    pub start: TextPos,
    /// The length of this span in bytes.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether this span contains the given position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A text range with start and end positions.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextRange {
    /// The byte offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The byte offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    /// Create a new text range.
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    /// Create an empty range at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    /// The length of this range in bytes.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    /// Whether this range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Convert to a TextSpan.
    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }

    /// The source text covered by this range.
    #[inline]
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        &text[self.to_range()]
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        range.to_span()
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column in bytes.
    pub character: u32,
}

/// A map from byte offsets to line numbers, built from source text.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Get the line number (0-based) for a byte offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the line and column for a byte offset.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }

    /// Get the byte offset of the start of a line.
    pub fn line_start(&self, line: u32) -> TextPos {
        self.line_starts[line as usize]
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// A single replacement of `range` in a snapshot by `new_text`.
///
/// An empty range is a pure insertion; an empty `new_text` is a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub range: TextRange,
    pub new_text: String,
}

impl TextChange {
    pub fn insert(pos: TextPos, text: impl Into<String>) -> Self {
        Self {
            range: TextRange::empty(pos),
            new_text: text.into(),
        }
    }

    pub fn delete(range: TextRange) -> Self {
        Self {
            range,
            new_text: String::new(),
        }
    }

    pub fn replace(range: TextRange, text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: text.into(),
        }
    }
}

/// Apply a batch of non-overlapping changes to `text`.
///
/// Changes may be given in any order. Insertions at the same offset keep the
/// order in which they were supplied.
pub fn apply_text_changes(text: &str, changes: &[TextChange]) -> String {
    let mut ordered: Vec<&TextChange> = changes.iter().collect();
    ordered.sort_by_key(|c| (c.range.pos, c.range.end));

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for change in ordered {
        let range = change.range.to_range();
        debug_assert!(range.start >= cursor, "overlapping text changes at {}", range.start);
        output.push_str(&text[cursor..range.start]);
        output.push_str(&change.new_text);
        cursor = range.end.max(cursor);
    }
    output.push_str(&text[cursor..]);
    output
}

/// The line break `text` uses, judged by its first one. Defaults to `\n`.
pub fn detect_new_line(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Length of the line break starting at `pos`: 2 for `\r\n`, 1 for `\n`, 0 otherwise.
pub fn line_break_len_at(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
        assert_eq!(span.end(), 15);
        assert!(span.contains(5));
        assert!(span.contains(14));
        assert!(!span.contains(15));
    }

    #[test]
    fn test_range_slice() {
        let text = "export const Structure = {};";
        let range = TextRange::new(13, 22);
        assert_eq!(range.slice(text), "Structure");
        assert_eq!(range.len(), 9);
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0);
        assert_eq!(map.line_of(6), 1);
        assert_eq!(map.line_of(12), 2);

        let lc = map.line_and_column_of(8);
        assert_eq!(lc.line, 1);
        assert_eq!(lc.character, 2);
        assert_eq!(map.line_start(2), 12);
    }

    #[test]
    fn test_apply_changes_out_of_order() {
        let text = "a, b, c";
        let changes = vec![
            TextChange::replace(TextRange::new(6, 7), "C"),
            TextChange::delete(TextRange::new(1, 4)),
        ];
        assert_eq!(apply_text_changes(text, &changes), "a, C");
    }

    #[test]
    fn test_apply_insertions_at_same_offset_keep_order() {
        let text = "{}";
        let changes = vec![TextChange::insert(1, "x"), TextChange::insert(1, "y")];
        assert_eq!(apply_text_changes(text, &changes), "{xy}");
    }

    #[test]
    fn test_apply_no_changes_is_identity() {
        let text = "import { A } from \"./a\";\n";
        assert_eq!(apply_text_changes(text, &[]), text);
    }

    #[test]
    fn test_detect_new_line() {
        assert_eq!(detect_new_line("a\r\nb\nc"), "\r\n");
        assert_eq!(detect_new_line("a\nb\r\n"), "\n");
        assert_eq!(detect_new_line("single line"), "\n");
    }

    #[test]
    fn test_line_break_len_at() {
        let text = "a\r\nb\nc";
        assert_eq!(line_break_len_at(text, 1), 2);
        assert_eq!(line_break_len_at(text, 4), 1);
        assert_eq!(line_break_len_at(text, 0), 0);
        assert_eq!(line_break_len_at(text, text.len()), 0);
    }
}
