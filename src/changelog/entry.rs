//! Render a complete changelog entry.

use crate::identity::Identity;

use super::header::ChangelogHeader;
use super::trailer::render_trailer;

/// Indentation for the release line and bullets. Spaces, never tabs.
pub const ENTRY_INDENT: &str = "    ";

/// Marker that opens a bullet item.
pub const BULLET_MARKER: &str = "- ";

/// Line of the first bullet, counted from the entry header.
pub const FIRST_BULLET_LINE: usize = 4;

/// Column where the text of a bullet starts.
pub const BULLET_TEXT_COLUMN: usize = ENTRY_INDENT.len() + BULLET_MARKER.len();

/// Turn free text into bullet lines: each line is trimmed and prefixed with
/// `    - `. An empty message gives a single empty bullet.
pub fn format_bullets(message: &str) -> String {
    message
        .split('\n')
        .map(|line| format!("{}{}{}", ENTRY_INDENT, BULLET_MARKER, line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compose the entry text.
///
/// ```text
/// title (version) distribution; urgency=low
///
///     * Release version
///
///     - message line
///
///     -- Name <email> date
/// ```
pub fn render_entry(
    header: &ChangelogHeader,
    new_version: &str,
    message: &str,
    identity: &Identity,
    date: &str,
) -> String {
    format!(
        "{}\n\n{}* Release {}\n\n{}\n\n{}",
        header.line_for(new_version),
        ENTRY_INDENT,
        new_version,
        format_bullets(message),
        render_trailer(&identity.name, &identity.email, date)
    )
}
