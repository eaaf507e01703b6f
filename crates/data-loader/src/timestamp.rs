//! Timestamp construction for the forecast/observation join.
//!
//! Hourly forecasts carry a calendar date (from their parent day) and a time
//! of day encoded as HHMM without zero padding (`0`, `900`, `2300`). The
//! encoding is decoded by left-padding to width 4 and slicing, exactly as
//! the upstream exports expect. A two-digit hour such as `15` therefore
//! becomes `00:15`; see DESIGN.md for why this is kept.

use crate::error::{DataLoadError, Result};
use chrono::{NaiveDate, NaiveDateTime};

const HOURLY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted for observation timestamps, tried in order
const CONDITION_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Split an HHMM time code into `(hour, minute)` text
///
/// Example: "900" -> ("09", "00"), "0" -> ("00", "00")
///
/// Codes longer than four characters are sliced the same way and left for
/// the timestamp parser to reject (or accept) as they are.
pub fn decode_time(time: &str) -> (String, String) {
    let chars: Vec<char> = time.trim().chars().collect();
    let padding = 4usize.saturating_sub(chars.len());

    let padded: Vec<char> = std::iter::repeat('0')
        .take(padding)
        .chain(chars)
        .collect();

    let hour: String = padded[0..2].iter().collect();
    let minute: String = padded[2..4].iter().collect();
    (hour, minute)
}

/// Combine a calendar date and an HHMM code into a timestamp
///
/// Builds `"{date} {HH}:{MM}:00"` and parses it strictly. A failure is
/// reported, never turned into a missing value. A blank code is rejected
/// before padding, otherwise it would read as midnight.
pub fn hourly_timestamp(date: &str, time: &str) -> Result<NaiveDateTime> {
    if time.trim().is_empty() {
        return Err(DataLoadError::Timestamp {
            value: format!("{} <empty time>", date.trim()),
            reason: "missing time code".to_string(),
        });
    }

    let (hour, minute) = decode_time(time);
    let text = format!("{} {}:{}:00", date.trim(), hour, minute);

    NaiveDateTime::parse_from_str(&text, HOURLY_FORMAT).map_err(|e| DataLoadError::Timestamp {
        value: text.clone(),
        reason: e.to_string(),
    })
}

/// Parse an observation timestamp
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (optionally with fractional seconds or a
/// `T` separator), `YYYY-MM-DD HH:MM`, or a bare date meaning midnight.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();

    for format in CONDITION_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DataLoadError::Timestamp {
            value: trimmed.to_string(),
            reason: "unrecognized timestamp format".to_string(),
        })
}
