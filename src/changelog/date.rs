//! Debian changelog trailer dates.
//!
//! Shape: `Fri, 05 Jan 2024 08:30:00 +0000`. English weekday and month
//! names, 24-hour clock, signed four-digit UTC offset.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

use crate::error::EntryError;

const TRAILER_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Format a zoned timestamp as a trailer date.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(TRAILER_DATE_FORMAT).to_string()
}

/// Format `instant` as seen from a zone `utc_offset_minutes` east of UTC.
pub fn format_date_with_offset(
    instant: DateTime<Utc>,
    utc_offset_minutes: i32,
) -> Result<String, EntryError> {
    let offset = utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(EntryError::InvalidUtcOffset(utc_offset_minutes))?;

    Ok(format_date(&instant.with_timezone(&offset)))
}

/// The current time in the local zone, as a trailer date.
pub fn now_local() -> String {
    format_date(&Local::now())
}
