//! Line-oriented document model and batched edit application.
//!
//! Positions are zero-based; columns count characters, not bytes.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::DocumentError;

/// A point in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open span `[start, end)` of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// An empty range at `at`.
    pub fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Replace `range` with `text`. Inserts use an empty range, deletes empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub range: TextRange,
    pub text: String,
}

impl TextEdit {
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self {
            range: TextRange::point(at),
            text: text.into(),
        }
    }

    pub fn replace(range: TextRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn delete(range: TextRange) -> Self {
        Self {
            range,
            text: String::new(),
        }
    }
}

/// Line terminator used when writing a document back out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// The ending of the first line of `text`, or `Lf` for single-line text.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(i) if text[..i].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// An ordered sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    trailing_newline: bool,
    line_ending: LineEnding,
}

impl Document {
    /// Split `text` into lines. A final line break is remembered, not kept as
    /// an extra empty line. Lines are stored without their `\r`; the ending
    /// of the first line is used for every line on output.
    pub fn from_text(text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = if text.is_empty() {
            vec![String::new()]
        } else {
            body.split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect()
        };

        Self {
            lines,
            trailing_newline,
            line_ending: LineEnding::detect(text),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            trailing_newline: false,
            line_ending: LineEnding::Lf,
        }
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text))
    }

    /// Write the document to `path` atomically, keeping the file's mode.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        write_atomic(path, self.to_text().as_bytes()).map_err(|source| {
            DocumentError::WriteFailed {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn to_text(&self) -> String {
        let newline = self.line_ending.as_str();
        let mut text = self.lines.join(newline);
        if self.trailing_newline {
            text.push_str(newline);
        }
        text
    }

    /// Whether `pos` names an existing line and a column no further than its end.
    pub fn contains(&self, pos: Position) -> bool {
        self.line(pos.line)
            .is_some_and(|line| pos.column <= line.chars().count())
    }

    /// Text covered by `range`, with `\n` between lines.
    pub fn text_in(&self, range: TextRange) -> Result<String, DocumentError> {
        self.check(range.start)?;
        self.check(range.end)?;

        let TextRange { start, end } = TextRange::new(range.start, range.end);
        if start.line == end.line {
            let line = &self.lines[start.line];
            return Ok(slice_chars(line, start.column, end.column).to_string());
        }

        let mut parts = Vec::with_capacity(end.line - start.line + 1);
        parts.push(slice_chars(&self.lines[start.line], start.column, usize::MAX));
        for line in &self.lines[start.line + 1..end.line] {
            parts.push(line.as_str());
        }
        parts.push(slice_chars(&self.lines[end.line], 0, end.column));
        Ok(parts.join("\n"))
    }

    /// Apply a batch of edits expressed in the coordinates of the current
    /// document. Edits must not overlap; inserts at the same position keep
    /// their batch order. Nothing is changed when any edit is invalid.
    pub fn apply(&mut self, edits: &[TextEdit]) -> Result<(), DocumentError> {
        for edit in edits {
            self.check(edit.range.start)?;
            self.check(edit.range.end)?;
            if edit.range.start > edit.range.end {
                return Err(DocumentError::InvalidPosition {
                    line: edit.range.end.line,
                    column: edit.range.end.column,
                });
            }
        }

        let mut order: Vec<usize> = (0..edits.len()).collect();
        order.sort_by_key(|&i| (edits[i].range.start, i));
        for pair in order.windows(2) {
            let (a, b) = (&edits[pair[0]].range, &edits[pair[1]].range);
            if a.end > b.start {
                return Err(DocumentError::OverlappingEdits {
                    line: b.start.line,
                    column: b.start.column,
                });
            }
        }

        for &i in order.iter().rev() {
            self.splice(&edits[i]);
        }
        Ok(())
    }

    fn splice(&mut self, edit: &TextEdit) {
        let TextRange { start, end } = edit.range;
        let prefix = slice_chars(&self.lines[start.line], 0, start.column).to_string();
        let suffix = slice_chars(&self.lines[end.line], end.column, usize::MAX).to_string();

        let joined = format!("{}{}{}", prefix, edit.text, suffix);
        let replacement: Vec<String> = joined
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        self.lines.splice(start.line..=end.line, replacement);
    }

    fn check(&self, pos: Position) -> Result<(), DocumentError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(DocumentError::InvalidPosition {
                line: pos.line,
                column: pos.column,
            })
        }
    }
}

/// Replace `path` with `contents` via a temporary file in the same directory.
///
/// An existing file's permissions carry over to the replacement.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;

    match std::fs::metadata(path) {
        Ok(meta) => file.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Slice `s` by character indices, clamping `end` to the string length.
pub(crate) fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(b, _)| b);
    let (start, end) = (byte_at(start), byte_at(end));
    if start >= end { "" } else { &s[start..end] }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::from_text(text)
    }

    #[test]
    fn test_from_text_remembers_trailing_newline() {
        let d = doc("a\nb\n");
        assert_eq!(d.lines(), ["a", "b"]);
        assert_eq!(d.to_text(), "a\nb\n");
    }

    #[test]
    fn test_from_text_without_trailing_newline() {
        let d = doc("a\nb");
        assert_eq!(d.lines(), ["a", "b"]);
        assert_eq!(d.to_text(), "a\nb");
    }

    #[test]
    fn test_from_text_empty() {
        let d = doc("");
        assert_eq!(d.line_count(), 1);
        assert_eq!(d.to_text(), "");
    }

    #[test]
    fn test_crlf_lines_are_stored_without_cr() {
        let d = doc("a\r\nb\r\n");
        assert_eq!(d.lines(), ["a", "b"]);
        assert_eq!(d.line_ending(), LineEnding::CrLf);
        assert_eq!(d.to_text(), "a\r\nb\r\n");
    }

    #[test]
    fn test_edit_keeps_crlf_endings() {
        let mut d = doc("head\r\n\r\n    -- A <a@b.com> old\r\n");
        let range = TextRange::new(Position::new(2, 0), Position::new(2, 22));
        d.apply(&[TextEdit::replace(range, "    -- A <a@b.com> new\nextra")])
            .unwrap();
        assert_eq!(d.to_text(), "head\r\n\r\n    -- A <a@b.com> new\r\nextra\r\n");
    }

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("single"), LineEnding::Lf);
    }

    #[test]
    fn test_insert_multiline_text() {
        let mut d = doc("hello world");
        d.apply(&[TextEdit::insert(Position::new(0, 5), ",\nbig")])
            .unwrap();
        assert_eq!(d.lines(), ["hello,", "big world"]);
    }

    #[test]
    fn test_replace_across_lines() {
        let mut d = doc("one\ntwo\nthree");
        let range = TextRange::new(Position::new(0, 1), Position::new(2, 2));
        d.apply(&[TextEdit::replace(range, "X")]).unwrap();
        assert_eq!(d.lines(), ["oXree"]);
    }

    #[test]
    fn test_batch_uses_pre_edit_coordinates() {
        let mut d = doc("a\nb\nc");
        d.apply(&[
            TextEdit::insert(Position::new(0, 1), "\n"),
            TextEdit::insert(Position::new(2, 0), "\n"),
        ])
        .unwrap();
        assert_eq!(d.lines(), ["a", "", "b", "", "c"]);
    }

    #[test]
    fn test_same_position_inserts_keep_order() {
        let mut d = doc("x");
        d.apply(&[
            TextEdit::insert(Position::new(0, 0), "1"),
            TextEdit::insert(Position::new(0, 0), "2"),
        ])
        .unwrap();
        assert_eq!(d.lines(), ["12x"]);
    }

    #[test]
    fn test_overlapping_edits_are_rejected() {
        let mut d = doc("abcdef");
        let first = TextRange::new(Position::new(0, 0), Position::new(0, 3));
        let second = TextRange::new(Position::new(0, 2), Position::new(0, 4));
        let err = d
            .apply(&[TextEdit::delete(first), TextEdit::delete(second)])
            .unwrap_err();
        assert!(matches!(err, DocumentError::OverlappingEdits { .. }));
        assert_eq!(d.lines(), ["abcdef"]);
    }

    #[test]
    fn test_invalid_position_leaves_document_untouched() {
        let mut d = doc("abc\ndef");
        let err = d
            .apply(&[
                TextEdit::insert(Position::new(0, 0), "ok"),
                TextEdit::insert(Position::new(1, 9), "bad"),
            ])
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidPosition { line: 1, column: 9 }));
        assert_eq!(d.lines(), ["abc", "def"]);
    }

    #[test]
    fn test_columns_count_characters() {
        let mut d = doc("héllo");
        d.apply(&[TextEdit::insert(Position::new(0, 2), "_")]).unwrap();
        assert_eq!(d.lines(), ["hé_llo"]);
    }

    #[test]
    fn test_text_in_multiline_range() {
        let d = doc("first\nsecond\nthird");
        let range = TextRange::new(Position::new(0, 2), Position::new(2, 3));
        assert_eq!(d.text_in(range).unwrap(), "rst\nsecond\nthi");
    }

    #[test]
    fn test_range_new_orders_endpoints() {
        let range = TextRange::new(Position::new(3, 0), Position::new(1, 4));
        assert_eq!(range.start, Position::new(1, 4));
        assert_eq!(range.end, Position::new(3, 0));
    }

    #[test]
    fn test_save_is_atomic_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changelog");
        std::fs::write(&path, "old\n").unwrap();

        let d = doc("new\ncontent\n");
        d.save(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\ncontent\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changelog");
        std::fs::write(&path, "old\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        Document::load(&path).unwrap().save(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
