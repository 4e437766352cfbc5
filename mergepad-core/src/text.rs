//! Line splitting and joining for whole-document text.
//!
//! Documents are split on `\n`, `\r\n` and lone `\r`. A final terminator does not
//! produce a trailing empty line, so `"a\nb\n"` and `"a\nb"` both split into
//! `["a", "b"]`. Joining uses the host platform's terminator.

use std::ops::Range;

/// Line terminator written by [`join_lines`] on this platform.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator written by [`join_lines`] on this platform.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// An ordered, immutable sequence of lines produced from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Splits `text` into lines using [`split_lines`].
    pub fn from_text(text: &str) -> Self {
        Self { lines: split_lines(text) }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines, in document order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// The lines covered by a half-open range.
    ///
    /// Out-of-bounds ranges are clamped rather than panicking, so a stale range
    /// yields fewer lines instead of taking the UI down.
    pub fn slice(&self, range: Range<usize>) -> &[String] {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        &self.lines[start..end]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    /// Joins the sequence back into a document with [`LINE_ENDING`].
    pub fn to_text(&self) -> String {
        join_lines(&self.lines)
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

impl<S: Into<String>> FromIterator<S> for LineSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { lines: iter.into_iter().map(Into::into).collect() }
    }
}

impl<'a> IntoIterator for &'a LineSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Splits a document into lines on `\n`, `\r\n` or `\r`.
///
/// The separators themselves are not kept. An empty document has no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    // Separators are ASCII, so byte offsets here are always char boundaries.
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(text[start..i].to_owned());
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(text[start..i].to_owned());
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(text[start..].to_owned());
    }
    lines
}

/// Joins lines with the platform terminator. No terminator follows the last line.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push_str(LINE_ENDING);
        }
        out.push_str(line.as_ref());
    }
    out
}
