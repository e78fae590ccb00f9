//! Where a new entry goes, which blank lines surround it, and where the
//! cursor lands afterwards.
//!
//! An entry always occupies whole lines. Whitespace left before or after the
//! insertion point on its line is absorbed; other text is pushed onto its own
//! line. Neighbouring non-blank lines are separated from the entry by exactly
//! one blank line.

use serde::Serialize;
use tracing::debug;

use crate::document::{slice_chars, Position, TextRange};
use crate::error::EntryError;

use super::entry::{BULLET_TEXT_COLUMN, FIRST_BULLET_LINE};

/// Computed placement of an entry in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Span replaced by the entry text.
    pub range: TextRange,
    /// Text before the insertion point stays on its own line.
    pub break_before: bool,
    /// A blank line goes between the entry and the line above it.
    pub blank_above: bool,
    /// Text after the insertion point moves to its own line.
    pub break_after: bool,
    /// A blank line goes between the entry and the line below it.
    pub blank_below: bool,
    /// Line of the entry header once placed.
    pub header_line: usize,
    /// Final cursor position.
    pub cursor: Position,
}

impl Placement {
    /// Surround the rendered entry with the line breaks this placement needs.
    pub fn wrap(&self, entry: &str) -> String {
        let mut text = String::with_capacity(entry.len() + 4);
        if self.break_before {
            text.push('\n');
        }
        if self.blank_above {
            text.push('\n');
        }
        text.push_str(entry);
        if self.blank_below {
            text.push('\n');
        }
        if self.break_after {
            text.push('\n');
        }
        text
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Plan the insertion of an entry of `entry_lines` lines at `at`.
///
/// With an empty message the cursor goes to the end of the empty first
/// bullet, ready for typing. Otherwise it goes to the line after the entry,
/// or to the entry header when the entry ends the document.
pub fn plan_placement<S: AsRef<str>>(
    lines: &[S],
    at: Position,
    entry_lines: usize,
    message_is_empty: bool,
) -> Result<Placement, EntryError> {
    let out_of_range = EntryError::PositionOutOfRange {
        line: at.line,
        column: at.column,
    };
    let line = lines.get(at.line).ok_or(out_of_range.clone())?.as_ref();
    let line_len = line.chars().count();
    if at.column > line_len {
        return Err(out_of_range);
    }

    let prefix = slice_chars(line, 0, at.column);
    let suffix = slice_chars(line, at.column, usize::MAX);
    let break_before = !is_blank(prefix);
    let break_after = !is_blank(suffix);

    let above = if break_before {
        Some(prefix)
    } else if at.line > 0 {
        Some(lines[at.line - 1].as_ref())
    } else {
        None
    };
    let below = if break_after {
        Some(suffix)
    } else {
        lines.get(at.line + 1).map(|l| l.as_ref())
    };
    let blank_above = above.is_some_and(|l| !is_blank(l));
    let blank_below = below.is_some_and(|l| !is_blank(l));

    let start = if break_before {
        at
    } else {
        Position::new(at.line, 0)
    };
    let end = if break_after {
        at
    } else {
        Position::new(at.line, line_len)
    };

    let header_line = at.line + usize::from(break_before) + usize::from(blank_above);
    let has_following_line = break_after || blank_below || at.line + 1 < lines.len();

    let cursor = if message_is_empty {
        Position::new(header_line + FIRST_BULLET_LINE, BULLET_TEXT_COLUMN)
    } else if has_following_line {
        Position::new(header_line + entry_lines, 0)
    } else {
        Position::new(header_line, 0)
    };

    debug!(
        blank_above,
        blank_below, break_before, break_after, header_line, "entry placement"
    );

    Ok(Placement {
        range: TextRange::new(start, end),
        break_before,
        blank_above,
        break_after,
        blank_below,
        header_line,
        cursor,
    })
}
