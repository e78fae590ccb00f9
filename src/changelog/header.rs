//! Recognize and decompose Debian changelog header lines.
//!
//! Grammar (whole line, non-greedy groups):
//!
//! ```text
//! <title> (<version>) <distribution>; urgency=low
//! ```

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

/// Distribution used when a line does not match the header grammar.
pub const DEFAULT_DISTRIBUTION: &str = "stable";

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?) \((.*?)\) (.*?); urgency=low$").expect("Invalid header regex")
});

/// The fields of a changelog header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogHeader {
    pub title: String,
    /// Raw text between the parentheses, not yet validated. Parse it as a
    /// [`VersionString`](crate::version::VersionString) before bumping.
    pub version: String,
    pub distribution: String,
}

impl Default for ChangelogHeader {
    fn default() -> Self {
        Self {
            title: String::new(),
            version: String::new(),
            distribution: DEFAULT_DISTRIBUTION.to_string(),
        }
    }
}

impl ChangelogHeader {
    /// Render the header line for this entry at `version`.
    pub fn line_for(&self, version: &str) -> String {
        format!(
            "{} ({}) {}; urgency=low",
            self.title, version, self.distribution
        )
    }
}

/// Whether `line` has the shape of a changelog header.
pub fn is_header_line(line: &str) -> bool {
    HEADER_RE.is_match(line)
}

/// Parse a header line, returning `None` when the line does not match.
pub fn try_parse_header(line: &str) -> Option<ChangelogHeader> {
    let caps = HEADER_RE.captures(line)?;

    Some(ChangelogHeader {
        title: caps[1].to_string(),
        version: caps[2].to_string(),
        distribution: caps[3].to_string(),
    })
}

/// Parse a header line.
///
/// Lines that do not match yield [`ChangelogHeader::default`]: empty title and
/// version with the `stable` distribution. Callers that need to tell the two
/// apart use [`try_parse_header`].
pub fn parse_header(line: &str) -> ChangelogHeader {
    try_parse_header(line).unwrap_or_default()
}
