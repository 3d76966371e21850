//! Record types shared by the pipeline stages.

use serde::{Deserialize, Serialize, Serializer};

/// Free text scraped from a page. May hold zero, one or many dated days.
pub type RawPost = String;

/// A trimmed segment of a [`RawPost`] believed to describe exactly one day.
pub type PostUnit = String;

/// Structured walking stats for one day.
///
/// Numeric fields are either finite numbers or `None`; integral values
/// serialize as JSON integers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Canonical `"Oct 30"` label, or the original text when it could not be parsed
    #[serde(default)]
    pub date_label: Option<String>,

    #[serde(default, serialize_with = "serialize_stat")]
    pub minutes: Option<f64>,

    #[serde(default, serialize_with = "serialize_stat")]
    pub miles: Option<f64>,

    #[serde(default, serialize_with = "serialize_stat")]
    pub calories: Option<f64>,

    #[serde(default, serialize_with = "serialize_stat")]
    pub steps: Option<f64>,
}

impl StatRecord {
    pub fn new(date_label: impl Into<String>) -> Self {
        Self {
            date_label: Some(date_label.into()),
            ..Default::default()
        }
    }

    pub fn with_minutes(mut self, minutes: f64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    pub fn with_miles(mut self, miles: f64) -> Self {
        self.miles = Some(miles);
        self
    }

    pub fn with_calories(mut self, calories: f64) -> Self {
        self.calories = Some(calories);
        self
    }

    pub fn with_steps(mut self, steps: f64) -> Self {
        self.steps = Some(steps);
        self
    }

    /// True when no stat was extracted.
    pub fn is_empty(&self) -> bool {
        self.minutes.is_none()
            && self.miles.is_none()
            && self.calories.is_none()
            && self.steps.is_none()
    }

    /// Spreadsheet row: `[date_label, minutes, miles, calories, steps]`.
    pub fn to_row(&self) -> Vec<serde_json::Value> {
        vec![
            self.date_label
                .clone()
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
            stat_value(self.minutes),
            stat_value(self.miles),
            stat_value(self.calories),
            stat_value(self.steps),
        ]
    }
}

/// One line of the JSON-lines store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(flatten)]
    pub record: StatRecord,

    /// ISO-8601 UTC timestamp shared by every record of a batch
    pub created_at: String,
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn is_integral(value: f64) -> bool {
    value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}

fn serialize_stat<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *value {
        Some(v) if is_integral(v) => serializer.serialize_i64(v as i64),
        Some(v) if v.is_finite() => serializer.serialize_f64(v),
        _ => serializer.serialize_none(),
    }
}

/// JSON value for a stat, using the same integer rule as serialization.
pub fn stat_value(value: Option<f64>) -> serde_json::Value {
    match value {
        Some(v) if is_integral(v) => serde_json::Value::from(v as i64),
        Some(v) => serde_json::Number::from_f64(v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        None => serde_json::Value::Null,
    }
}
