//! Code-point text buffer with line and word navigation.
//!
//! Offsets are code-point indices in `0..=len`. Lines are separated by `'\n'`;
//! carriage returns are normalized away on construction and insertion.

use std::fmt;

/// Replace `\r\n` and lone `\r` with `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    chars: Vec<char>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            chars: normalize_line_endings(text).chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn get(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// Text in `start..end`, clamped to the buffer.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Replace `start..end` with `text` and return the removed text, or
    /// `None` when the range does not lie inside the buffer.
    pub fn splice(&mut self, start: usize, end: usize, text: &str) -> Option<String> {
        if start > end || end > self.len() {
            return None;
        }
        let insert = normalize_line_endings(text);
        let removed = self.chars.splice(start..end, insert.chars()).collect();
        Some(removed)
    }

    /// Iterate lines without their terminators. An empty buffer has one empty line.
    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.chars.split(|c| *c == '\n')
    }

    /// Offset of the first code point of the line containing `from`.
    pub fn line_start(&self, from: usize) -> usize {
        let from = from.min(self.len());
        self.chars[..from]
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |i| i + 1)
    }

    /// Offset of the terminator (or buffer end) of the line starting at or containing `from`.
    pub fn line_end(&self, from: usize) -> usize {
        let from = from.min(self.len());
        self.chars[from..]
            .iter()
            .position(|c| *c == '\n')
            .map_or(self.len(), |i| from + i)
    }

    /// Column of `from` within its line.
    pub fn column(&self, from: usize) -> usize {
        from.min(self.len()) - self.line_start(from)
    }

    /// Start of the line after the one containing `from`.
    pub fn next_line_start(&self, from: usize) -> Option<usize> {
        let end = self.line_end(from);
        (end < self.len()).then_some(end + 1)
    }

    /// Start of the line before the one containing `from`.
    pub fn prev_line_start(&self, from: usize) -> Option<usize> {
        let start = self.line_start(from);
        (start > 0).then(|| self.line_start(start - 1))
    }

    /// Offset of `col` within the line starting at `line_start`, clamped to its end.
    pub fn clamp_to_line(&self, line_start: usize, col: usize) -> usize {
        let end = self.line_end(line_start);
        (line_start + col).min(end)
    }

    /// Start of the word before `from`, skipping separators directly behind it.
    pub fn word_start_before(&self, from: usize) -> usize {
        let mut s = from.min(self.len()).saturating_sub(1);
        while s > 0 && is_separator(self.chars[s - 1]) {
            s -= 1;
        }
        self.chars[..s]
            .iter()
            .rposition(|c| is_separator(*c))
            .map_or(0, |i| i + 1)
    }

    /// End of the word after `from`, skipping separators directly ahead of it.
    pub fn word_end_after(&self, from: usize) -> usize {
        let len = self.len();
        let mut s = (from + 1).min(len);
        while s < len && is_separator(self.chars[s]) {
            s += 1;
        }
        while s < len && !is_separator(self.chars[s]) {
            s += 1;
        }
        s
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace()
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| fmt::Write::write_char(f, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_replaces_and_returns_removed() {
        let mut buf = Buffer::from_text("Golang Zig");
        assert_eq!(buf.splice(7, 10, "Rust").as_deref(), Some("Zig"));
        assert_eq!(buf.to_string(), "Golang Rust");
        assert_eq!(buf.splice(3, 20, "x"), None);
        assert_eq!(buf.splice(5, 4, "x"), None);
    }

    #[test]
    fn line_navigation() {
        let buf = Buffer::from_text("ab\r\ncdef\n\nx");
        assert_eq!(buf.to_string(), "ab\ncdef\n\nx");
        assert_eq!(buf.line_start(5), 3);
        assert_eq!(buf.line_end(3), 7);
        assert_eq!(buf.column(5), 2);
        assert_eq!(buf.next_line_start(1), Some(3));
        assert_eq!(buf.next_line_start(10), None);
        assert_eq!(buf.prev_line_start(5), Some(0));
        assert_eq!(buf.prev_line_start(1), None);
        assert_eq!(buf.clamp_to_line(8, 3), 8);
        assert_eq!(buf.clamp_to_line(3, 2), 5);
        let lines: Vec<String> = buf.lines().map(|l| l.iter().collect()).collect();
        assert_eq!(lines, vec!["ab", "cdef", "", "x"]);
    }

    #[test]
    fn word_navigation() {
        let buf = Buffer::from_text("foo bar  baz");
        assert_eq!(buf.word_start_before(12), 9);
        assert_eq!(buf.word_start_before(9), 4);
        assert_eq!(buf.word_start_before(2), 0);
        assert_eq!(buf.word_end_after(0), 3);
        assert_eq!(buf.word_end_after(3), 7);
        assert_eq!(buf.word_end_after(7), 12);
        assert_eq!(buf.word_end_after(12), 12);
    }
}
