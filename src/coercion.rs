//! Conversion of raw field text into typed values
//!
//! Every helper follows the same policy: blank text (empty or whitespace
//! only) means "absent" and yields `None` or the caller-supplied default,
//! while non-blank text must parse or the conversion fails with
//! [`TvdbError::Format`]. Defaults are chosen per field by the builders.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::TvdbError;
use crate::models::{ContentRating, Status};

/// Date layout used by the API, e.g. `2004-09-22`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time layouts seen in `Airs_Time`, tried in order.
const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
    ("Sunday", Weekday::Sun),
];

/// Returns true for empty or whitespace-only text.
pub(crate) fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

fn format_error(field: &'static str, raw: &str, reason: impl Display) -> TvdbError {
    TvdbError::Format {
        field,
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses an optional number; blank text is `None`.
pub(crate) fn optional_number<T>(field: &'static str, raw: &str) -> Result<Option<T>, TvdbError>
where
    T: FromStr,
    T::Err: Display,
{
    if is_blank(raw) {
        return Ok(None);
    }
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e| format_error(field, raw, e))
}

/// Parses a number that falls back to `default` when blank.
pub(crate) fn number_or<T>(field: &'static str, raw: &str, default: T) -> Result<T, TvdbError>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(optional_number(field, raw)?.unwrap_or(default))
}

/// Parses an optional `YYYY-MM-DD` date.
pub(crate) fn optional_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, TvdbError> {
    if is_blank(raw) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(Some)
        .map_err(|e| format_error(field, raw, e))
}

/// Parses an optional time of day such as `9:00 PM` or `21:00`.
pub(crate) fn optional_time(field: &'static str, raw: &str) -> Result<Option<NaiveTime>, TvdbError> {
    if is_blank(raw) {
        return Ok(None);
    }
    let trimmed = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .map(Some)
        .ok_or_else(|| format_error(field, raw, "unrecognized time of day"))
}

/// Maps an English weekday name; blank is `None`, anything unknown fails.
pub(crate) fn optional_weekday(field: &'static str, raw: &str) -> Result<Option<Weekday>, TvdbError> {
    if is_blank(raw) {
        return Ok(None);
    }
    let trimmed = raw.trim();
    WEEKDAYS
        .iter()
        .find(|(name, _)| *name == trimmed)
        .map(|(_, day)| Some(*day))
        .ok_or_else(|| format_error(field, raw, "unknown day of week"))
}

/// Maps the series status; blank is [`Status::Unknown`], anything unknown fails.
pub(crate) fn status(field: &'static str, raw: &str) -> Result<Status, TvdbError> {
    if is_blank(raw) {
        return Ok(Status::Unknown);
    }
    Status::from_wire(raw.trim()).ok_or_else(|| format_error(field, raw, "unknown status"))
}

/// Maps a certification string; blank or unknown input is [`ContentRating::Unknown`].
pub(crate) fn content_rating(raw: &str) -> ContentRating {
    if is_blank(raw) {
        return ContentRating::Unknown;
    }
    ContentRating::from_wire(raw.trim()).unwrap_or_else(|| {
        tracing::warn!("Unrecognized content rating '{}', using Unknown", raw.trim());
        ContentRating::Unknown
    })
}

/// Splits a `|`-delimited list, dropping empty segments.
pub(crate) fn pipe_list(raw: &str) -> Vec<String> {
    raw.split('|')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns `None` for blank text, the text otherwise.
pub(crate) fn optional_text(raw: &str) -> Option<String> {
    if is_blank(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}
