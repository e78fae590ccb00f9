//! debcl - create and update Debian changelog entries.
//!
//! # Overview
//!
//! debcl finds the changelog header nearest the cursor, bumps its version,
//! and renders a dated entry with bullet-formatted notes and an author
//! trailer. It can also refresh the date of an existing entry. The core is
//! pure text processing over a [`document::Document`]; every operation
//! returns a plan of edits that an editor or the `debcl` binary applies.

pub mod changelog;
pub mod commands;
pub mod document;
pub mod error;
pub mod identity;
pub mod version;

// Re-export commonly used types
pub use changelog::{ChangelogHeader, ContinuationState, EntryBoundary, Placement};
pub use commands::{DateUpdatePlan, NewEntryPlan, NewEntryRequest};
pub use document::{Document, LineEnding, Position, TextEdit, TextRange};
pub use error::{ConfigError, DocumentError, EntryError};
pub use identity::{Identity, IdentityConfig};
pub use version::VersionString;
