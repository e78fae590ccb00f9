//! Debian changelog recognition, rendering, and editing policy.

pub mod continuation;
pub mod date;
pub mod entry;
pub mod header;
pub mod locator;
pub mod placement;
pub mod trailer;

pub use continuation::{should_continue_bullet, ContinuationState};
pub use date::{format_date, format_date_with_offset, now_local};
pub use entry::{format_bullets, render_entry};
pub use header::{is_header_line, parse_header, try_parse_header, ChangelogHeader};
pub use locator::{find_entry_boundary, find_header_at_or_below, EntryBoundary};
pub use placement::{plan_placement, Placement};
pub use trailer::{is_trailer_line, parse_trailer, render_trailer, Trailer};
