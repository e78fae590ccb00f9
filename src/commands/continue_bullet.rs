//! One-shot bullet continuation for hosts that report single cursor moves.

use crate::changelog::ContinuationState;
use crate::document::{Document, Position, TextEdit};
use crate::error::EntryError;

/// Decide whether moving the cursor from `previous_line` to `cursor` should
/// insert a `- ` marker, and return that insertion.
pub fn plan_continuation(
    document: Option<&Document>,
    previous_line: usize,
    cursor: Position,
) -> Result<Option<TextEdit>, EntryError> {
    let document = document.ok_or(EntryError::NoActiveDocument)?;
    if !document.contains(cursor) {
        return Err(EntryError::PositionOutOfRange {
            line: cursor.line,
            column: cursor.column,
        });
    }

    let mut state = ContinuationState::at_line(previous_line);
    let edit = state.on_cursor_change(document.lines(), cursor);
    state.finish_insertion();
    Ok(edit)
}
