//! Find header lines and entry boundaries in a document.

use serde::Serialize;
use tracing::debug;

use super::header::is_header_line;
use super::trailer::is_trailer_line;

/// The header and trailer lines that delimit one changelog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryBoundary {
    pub header_line: usize,
    pub trailer_line: usize,
}

/// Index of the first header line at or after `from_line`.
pub fn find_header_at_or_below<S: AsRef<str>>(lines: &[S], from_line: usize) -> Option<usize> {
    let found = lines
        .iter()
        .enumerate()
        .skip(from_line)
        .find(|(_, line)| is_header_line(line.as_ref()))
        .map(|(i, _)| i);

    debug!(from_line, ?found, "header search");
    found
}

/// Locate the entry around `cursor_line`.
///
/// The header is the nearest header line at or above the cursor; the trailer
/// is the nearest trailer line at or below it. The two scans are independent.
pub fn find_entry_boundary<S: AsRef<str>>(lines: &[S], cursor_line: usize) -> Option<EntryBoundary> {
    if cursor_line >= lines.len() {
        return None;
    }

    let header_line = (0..=cursor_line)
        .rev()
        .find(|&i| is_header_line(lines[i].as_ref()))?;
    let trailer_line = (cursor_line..lines.len()).find(|&i| is_trailer_line(lines[i].as_ref()))?;

    debug!(header_line, trailer_line, "entry boundary");
    Some(EntryBoundary {
        header_line,
        trailer_line,
    })
}
