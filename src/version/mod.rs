//! Debian changelog version bumping.

pub mod bump;

pub use bump::{bump_version, VersionString};
