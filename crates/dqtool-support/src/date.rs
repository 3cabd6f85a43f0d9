//! Date parsing and formatting with strftime-style format strings.

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// Day-first format used when the caller has no better one, e.g.
/// `17/10/2026 09:30`.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Parses `text` with `format`.
///
/// Formats without a time component are accepted and yield midnight.
/// Returns `None` when the text does not match.
pub fn parse_date(text: &str, format: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(text, format) {
        Ok(date) => Some(date),
        Err(err) => match NaiveDate::parse_from_str(text, format) {
            Ok(day) => day.and_hms_opt(0, 0, 0),
            Err(_) => {
                log::debug!("{text:?} does not match {format:?}: {err}");
                None
            }
        },
    }
}

/// Formats `date` with `format`. Returns `None` for a malformed format
/// string or one that asks for fields a naive date has not got (time zones).
pub fn format_date(date: &NaiveDateTime, format: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        log::warn!("invalid date format {format:?}");
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.iter())).ok()?;
    Some(out)
}
