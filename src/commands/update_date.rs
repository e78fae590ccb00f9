//! Refresh the trailer date of the entry around the cursor.

use serde::Serialize;
use tracing::info;

use crate::changelog::{find_entry_boundary, parse_trailer, render_trailer, EntryBoundary};
use crate::document::{Document, Position, TextEdit, TextRange};
use crate::error::EntryError;

/// The outcome of [`plan_date_update`].
#[derive(Debug, Clone, Serialize)]
pub struct DateUpdatePlan {
    pub boundary: EntryBoundary,
    pub name: String,
    pub email: String,
    /// The new trailer line.
    pub trailer: String,
    /// Replaces the whole trailer line.
    pub edit: TextEdit,
}

/// Plan replacing the trailer of the entry containing `cursor_line` with one
/// dated `date`. The author is kept from the existing trailer.
pub fn plan_date_update(
    document: Option<&Document>,
    cursor_line: usize,
    date: &str,
) -> Result<DateUpdatePlan, EntryError> {
    let document = document.ok_or(EntryError::NoActiveDocument)?;

    let boundary = find_entry_boundary(document.lines(), cursor_line)
        .ok_or(EntryError::EntryBoundaryNotFound)?;
    let old = &document.lines()[boundary.trailer_line];
    let author = parse_trailer(old)?;

    let trailer = render_trailer(&author.name, &author.email, date);
    let range = TextRange::new(
        Position::new(boundary.trailer_line, 0),
        Position::new(boundary.trailer_line, old.chars().count()),
    );

    info!(line = boundary.trailer_line, "trailer date updated");
    Ok(DateUpdatePlan {
        boundary,
        name: author.name,
        email: author.email,
        edit: TextEdit::replace(range, trailer.clone()),
        trailer,
    })
}
