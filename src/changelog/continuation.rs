//! Bullet continuation while typing.
//!
//! When the cursor moves from a bullet line (`- item`) onto a fresh, indented,
//! otherwise empty line, a `- ` marker is inserted at the cursor. The trailer
//! (`-- Name <email>`) never triggers it.

use tracing::debug;

use crate::document::{Position, TextEdit};

use super::entry::BULLET_MARKER;

/// Whether moving from `previous` to `current` should open a new bullet.
pub fn should_continue_bullet(previous: &str, current: &str) -> bool {
    let previous = previous.trim();
    let indented = current.starts_with("    ") || current.starts_with('\t');

    previous.starts_with('-')
        && !previous.starts_with("--")
        && indented
        && current.trim().is_empty()
}

/// Tracks cursor movement and guards against reacting to its own insertion.
///
/// Idle until a line change matches [`should_continue_bullet`]; then busy
/// until the host reports the insertion done with [`finish_insertion`].
///
/// [`finish_insertion`]: ContinuationState::finish_insertion
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContinuationState {
    busy: bool,
    last_cursor_line: Option<usize>,
}

impl ContinuationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known cursor line, e.g. when attaching to an open document.
    pub fn at_line(line: usize) -> Self {
        Self {
            busy: false,
            last_cursor_line: Some(line),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_cursor_line(&self) -> Option<usize> {
        self.last_cursor_line
    }

    /// Feed a cursor change. Returns the marker insertion to apply, if any.
    ///
    /// The cursor is always recorded, including while busy.
    pub fn on_cursor_change<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        cursor: Position,
    ) -> Option<TextEdit> {
        let previous_line = self.last_cursor_line.replace(cursor.line);

        if self.busy {
            return None;
        }
        let previous_line = previous_line.filter(|&line| line != cursor.line)?;

        let previous = lines.get(previous_line)?.as_ref();
        let current = lines.get(cursor.line)?.as_ref();
        if !should_continue_bullet(previous, current) {
            return None;
        }

        debug!(line = cursor.line, "continuing bullet");
        self.busy = true;
        Some(TextEdit::insert(cursor, BULLET_MARKER))
    }

    /// Return to idle after the host applied the insertion.
    pub fn finish_insertion(&mut self) {
        self.busy = false;
    }
}
