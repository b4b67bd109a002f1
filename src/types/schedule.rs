//! Schedule types: days, time segments and week blocks

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::color::Fill;

/// Time-of-day boundary as written in the dataset ("0830")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// Key as written in the dataset, kept for diagnostics
    pub key: String,
    /// Numeric value, HHMM packed as hour * 100 + minute
    pub value: u32,
}

impl Boundary {
    /// Implicit start of every day
    pub fn midnight() -> Self {
        Self {
            key: "0000".to_string(),
            value: 0,
        }
    }

    /// Fractional hour: hour + minute / 60. Not range checked.
    pub fn hours(&self) -> f64 {
        let hour = self.value / 100;
        let minute = self.value % 100;
        hour as f64 + minute as f64 / 60.0
    }
}

/// One weighted entry of a segment ("2-red" or "red,blue")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorWeightEntry {
    pub weight: u32,
    pub fill: Fill,
}

/// Ordered color entries painted over one time interval, top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorSegmentSpec {
    pub entries: Vec<ColorWeightEntry>,
}

impl ColorSegmentSpec {
    pub fn new(entries: Vec<ColorWeightEntry>) -> Self {
        Self { entries }
    }

    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| e.weight as u64).sum()
    }
}

/// Interval (previous boundary, `end`] painted with `spec`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub end: Boundary,
    pub spec: ColorSegmentSpec,
}

/// One day row of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    /// Date key as written in the dataset ("05 Mar 2024")
    pub key: String,
    pub date: NaiveDate,
    /// Segments sorted by boundary ascending
    pub segments: Vec<Segment>,
}

impl DaySchedule {
    /// Weekday row index, Monday = 0
    pub fn weekday(&self) -> usize {
        crate::parsers::weekday(self.date)
    }
}

/// Consecutive days rendered into one image
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    /// Date key of the first day in the block
    pub start_key: String,
    pub start_date: NaiveDate,
    pub days: Vec<DaySchedule>,
    /// Contains the final day of the dataset
    pub is_final: bool,
}

impl Week {
    /// Output file stem: prefix + start key with non-alphanumerics removed
    pub fn file_stem(&self, prefix: &str) -> String {
        let re = Regex::new(r"[^A-Za-z0-9]").expect("valid regex");
        format!("{}{}", prefix, re.replace_all(&self.start_key, ""))
    }
}

/// Serializable overview of a week block (for listings)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeekSummary {
    pub start: String,
    pub file_stem: String,
    pub days: Vec<String>,
    pub is_final: bool,
}

impl WeekSummary {
    pub fn from_week(week: &Week, prefix: &str) -> Self {
        Self {
            start: week.start_key.clone(),
            file_stem: week.file_stem(prefix),
            days: week.days.iter().map(|d| d.key.clone()).collect(),
            is_final: week.is_final,
        }
    }
}
