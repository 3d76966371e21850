//! Date-label canonicalization and coercion of extractor output.
//!
//! Labels are rewritten to `"<Mon> <day>"` (e.g. `"Oct 30"`). The year is
//! never read from the input: every date is placed in the current year, so
//! out-of-range days roll over the way calendar arithmetic does (`2/30`
//! becomes `Mar 1` or `Mar 2` depending on the year).

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::types::StatRecord;

lazy_static! {
    static ref MONTH_DAY_REGEX: Regex = Regex::new(r"([0-9]{1,2})/([0-9]{1,2})").unwrap();
}

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Year assumed for year-less labels.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Rewrite a free-text date label as `"<Mon> <day>"` in the current year.
///
/// Labels that are empty or carry no recognizable month and day are
/// returned verbatim.
pub fn normalize_date_label(label: &str) -> String {
    normalize_date_label_in_year(label, current_year())
}

/// [`normalize_date_label`] with an explicit year.
pub fn normalize_date_label_in_year(label: &str, year: i32) -> String {
    if label.is_empty() {
        return label.to_string();
    }

    match parse_month_day(label.trim()).and_then(|(month, day)| resolve_date(year, month, day)) {
        Some(date) => format!("{} {}", MONTH_ABBREVIATIONS[date.month0() as usize], date.day()),
        None => label.to_string(),
    }
}

/// Numeric `m/d` wins over month names; the first month-name token decides.
fn parse_month_day(label: &str) -> Option<(u32, u32)> {
    if let Some(caps) = MONTH_DAY_REGEX.captures(label) {
        let month = caps[1].parse().ok()?;
        let day = caps[2].parse().ok()?;
        return Some((month, day));
    }

    let tokens: Vec<&str> = label.split_whitespace().collect();
    let (index, month) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, token)| month_from_name(token).map(|m| (i, m)))?;
    let day = tokens.get(index + 1).and_then(|t| leading_integer(t))?;

    Some((month, day))
}

fn month_from_name(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| *name == lower)
        .or_else(|| {
            MONTH_ABBREVIATIONS
                .iter()
                .position(|abbr| abbr.to_lowercase() == lower)
        })
        .map(|idx| idx as u32 + 1)
}

/// Leading decimal digits of a token (`"5th"` is 5).
fn leading_integer(token: &str) -> Option<u32> {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Month and day are 1-based; overflow carries into later months and years.
fn resolve_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if month == 0 || day == 0 {
        return None;
    }

    NaiveDate::from_ymd_opt(year, 1, 1)?
        .checked_add_months(Months::new(month - 1))?
        .checked_add_days(Days::new(u64::from(day - 1)))
}

/// Coerce one extractor entry into a [`StatRecord`] (current year).
pub fn normalize_extraction(entry: &Value) -> StatRecord {
    normalize_extraction_in_year(entry, current_year())
}

/// Coerce one extractor entry into a [`StatRecord`].
///
/// Non-string or empty labels become `None`; stats that are not finite JSON
/// numbers become `None`. Entries that are not objects yield an all-`None` record.
pub fn normalize_extraction_in_year(entry: &Value, year: i32) -> StatRecord {
    let date_label = entry
        .get("date_label")
        .and_then(Value::as_str)
        .filter(|label| !label.is_empty())
        .map(|label| normalize_date_label_in_year(label, year));

    StatRecord {
        date_label,
        minutes: coerce_stat(entry.get("minutes")),
        miles: coerce_stat(entry.get("miles")),
        calories: coerce_stat(entry.get("calories")),
        steps: coerce_stat(entry.get("steps")),
    }
}

/// A finite JSON number, or `None` for anything else.
pub fn coerce_stat(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|v| v.is_finite())
}
