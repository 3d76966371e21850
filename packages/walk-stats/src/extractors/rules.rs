//! Deterministic regex extractor.
//!
//! Understands the phrasings the language-model prompt describes: `31
//! minutes`, `1.81 miles`, `1/15 miles` (read as 1.15), `3,823 steps`, `117
//! calories`, and dates written as `Mon 10/30` or `October 30th`. Dates are
//! emitted as `m/d` and left to the result normalizer.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

use crate::error::Result;
use crate::traits::StatExtractor;

lazy_static! {
    static ref WEEKDAY_DATE_REGEX: Regex = Regex::new(
        r"(?i)\b(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+([0-9]{1,2})/([0-9]{1,2})"
    )
    .unwrap();

    static ref MONTH_DATE_REGEX: Regex = Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\b\.?\s+([0-9]{1,2})(?:st|nd|rd|th)?\b"
    )
    .unwrap();

    static ref MINUTES_REGEX: Regex =
        Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:minutes?|mins?)\b").unwrap();

    static ref MILES_REGEX: Regex =
        Regex::new(r"(?i)([0-9]+(?:[./][0-9]+)?)\s*(?:miles?|mi)\b").unwrap();

    static ref CALORIES_REGEX: Regex =
        Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:calories|calorie|cals?|kcal)\b").unwrap();

    static ref STEPS_REGEX: Regex = Regex::new(r"(?i)([0-9][0-9,]*)\s*steps?\b").unwrap();
}

const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Regex-based stand-in for the language-model extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExtractor;

impl RuleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract one entry from a single unit.
    pub fn extract_unit(&self, unit: &str) -> Value {
        json!({
            "date_label": find_date(unit),
            "minutes": capture_number(&MINUTES_REGEX, unit),
            "miles": find_miles(unit),
            "calories": capture_number(&CALORIES_REGEX, unit),
            "steps": capture_number(&STEPS_REGEX, unit),
        })
    }
}

fn find_date(text: &str) -> Option<String> {
    if let Some(caps) = WEEKDAY_DATE_REGEX.captures(text) {
        return Some(format!("{}/{}", &caps[1], &caps[2]));
    }

    let caps = MONTH_DATE_REGEX.captures(text)?;
    // Every accepted month word starts with its three-letter abbreviation
    let prefix: String = caps[1].to_lowercase().chars().take(3).collect();
    let month = MONTH_PREFIXES.iter().position(|m| *m == prefix)? + 1;
    Some(format!("{}/{}", month, &caps[2]))
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

fn capture_number(regex: &Regex, text: &str) -> Option<f64> {
    regex
        .captures(text)
        .and_then(|caps| parse_number(&caps[1]))
}

/// `1/15 miles` is a typo for `1.15 miles`.
fn find_miles(text: &str) -> Option<f64> {
    MILES_REGEX
        .captures(text)
        .and_then(|caps| parse_number(&caps[1].replace('/', ".")))
}

#[async_trait]
impl StatExtractor for RuleExtractor {
    fn name(&self) -> &str {
        "rules"
    }

    async fn extract(&self, units: &[String]) -> Result<Vec<Value>> {
        Ok(units.iter().map(|unit| self.extract_unit(unit)).collect())
    }
}
