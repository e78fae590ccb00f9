//! Changelog trailer lines: `    -- Name <email>  Date`.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::EntryError;

/// Prefix that marks the closing line of an entry.
pub const TRAILER_PREFIX: &str = "    -- ";

static TRAILER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-- (.*) <(.*)>").expect("Invalid trailer regex"));

/// Author fields recovered from an existing trailer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub name: String,
    pub email: String,
}

/// Whether `line` closes a changelog entry.
pub fn is_trailer_line(line: &str) -> bool {
    line.starts_with(TRAILER_PREFIX)
}

/// Extract the author name and email from a trailer line.
///
/// Both groups are greedy, so a name containing `<` still resolves to the
/// last `<...>` pair on the line.
pub fn parse_trailer(line: &str) -> Result<Trailer, EntryError> {
    let caps = TRAILER_RE
        .captures(line)
        .ok_or_else(|| EntryError::TrailerUnparsable(line.to_string()))?;

    Ok(Trailer {
        name: caps[1].to_string(),
        email: caps[2].to_string(),
    })
}

/// Render a trailer line.
pub fn render_trailer(name: &str, email: &str, date: &str) -> String {
    format!("{}{} <{}> {}", TRAILER_PREFIX, name, email, date)
}
