//! Date normalization for post ordering
//!
//! Post dates are free text ("20th February, 2025") and are displayed
//! verbatim. Ordering the catalog needs a comparable timestamp, so each date
//! is normalized once at parse time. A date no format accepts must not fail
//! the catalog; it maps to a sentinel that sorts after every real post.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

/// Timestamp substituted for unparseable dates
///
/// The Unix epoch predates any plausible post, so these land at the end of
/// a newest-first listing.
pub const SENTINEL: NaiveDateTime = NaiveDateTime::UNIX_EPOCH;

/// Accepted date formats, tried in order
const FORMATS: &[&str] = &[
    "%d %B, %Y", // 20 February, 2025
    "%d %B %Y",  // 20 February 2025
    "%B %d, %Y", // February 20, 2025
    "%Y-%m-%d",  // 2025-02-20
    "%Y/%m/%d",  // 2025/02/20
];

/// Normalize a free-text date into a comparable timestamp
///
/// Ordinal suffixes are stripped first, so "1st January, 2024" parses the
/// same as "1 January, 2024". Returns [`SENTINEL`] when no format matches.
pub fn normalize(text: &str) -> NaiveDateTime {
    let cleaned = strip_ordinal(text.trim());
    parse_date(&cleaned)
        .map(|date| date.and_time(NaiveTime::MIN))
        .unwrap_or(SENTINEL)
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Strip the first ordinal suffix ("21st" -> "21")
fn strip_ordinal(text: &str) -> Cow<'_, str> {
    lazy_static! {
        static ref ORDINAL: Regex = Regex::new(r"(\d+)(?:st|nd|rd|th)\b").unwrap();
    }
    ORDINAL.replace(text, "$1")
}
