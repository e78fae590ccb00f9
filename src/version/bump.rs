//! Increment the last dotted component of a changelog version.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EntryError;

/// A dot-separated sequence of non-negative integers, e.g. `1.2.3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct VersionString {
    segments: Vec<u64>,
}

impl VersionString {
    /// The numeric segments, most significant first.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Return the next version: the last segment plus one.
    ///
    /// There is no carry, so `0.9` becomes `0.10`. A last segment that is
    /// already `u64::MAX` cannot be bumped.
    pub fn bump(&self) -> Result<VersionString, EntryError> {
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            let current = *last;
            *last = current.checked_add(1).ok_or_else(|| EntryError::InvalidVersion {
                version: self.to_string(),
                segment: current.to_string(),
            })?;
        }
        Ok(VersionString { segments })
    }
}

impl FromStr for VersionString {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .split('.')
            .map(|segment| {
                let invalid = || EntryError::InvalidVersion {
                    version: s.to_string(),
                    segment: segment.to_string(),
                };
                // u64::from_str accepts a leading '+'
                if !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                segment.parse::<u64>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VersionString { segments })
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}

impl From<VersionString> for String {
    fn from(version: VersionString) -> Self {
        version.to_string()
    }
}

/// Parse `version` and return the bumped version as a string.
pub fn bump_version(version: &str) -> Result<String, EntryError> {
    Ok(version.parse::<VersionString>()?.bump()?.to_string())
}
