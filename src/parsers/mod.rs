//! Dataset loading: JSON schedule file -> ordered day schedules

mod date;
mod entry;
mod time;

pub use date::{parse_date, week_monday, weekday, DATE_FORMAT};
pub use entry::{parse_entry, parse_segment_spec};
pub use time::parse_boundary;

use crate::types::{DaySchedule, Result, Segment, WeekgridError};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Top-level object: date key -> day, in file order
struct RawDataset(Vec<(String, RawDay)>);

/// Boundary key -> segment array, in file order with repeats kept
struct RawDay(Vec<(String, RawSegment)>);

/// `[colorWeightEntryList, ...]`; only element 0 is used
struct RawSegment(Option<Vec<String>>);

impl<'de> Deserialize<'de> for RawDataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DatasetVisitor;

        impl<'de> Visitor<'de> for DatasetVisitor {
            type Value = RawDataset;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object keyed by \"DD Mon YYYY\" dates")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawDataset, A::Error> {
                let mut days = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(key) = map.next_key::<String>()? {
                    let day = map
                        .next_value::<RawDay>()
                        .map_err(|e| {
                            <A::Error as de::Error>::custom(format_args!("day {}: {}", key, e))
                        })?;
                    days.push((key, day));
                }
                Ok(RawDataset(days))
            }
        }

        deserializer.deserialize_map(DatasetVisitor)
    }
}

impl<'de> Deserialize<'de> for RawDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DayVisitor;

        impl<'de> Visitor<'de> for DayVisitor {
            type Value = RawDay;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object keyed by \"HHMM\" time boundaries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawDay, A::Error> {
                let mut segments = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(key) = map.next_key::<String>()? {
                    let segment = map
                        .next_value::<RawSegment>()
                        .map_err(|e| {
                            <A::Error as de::Error>::custom(format_args!("boundary {}: {}", key, e))
                        })?;
                    segments.push((key, segment));
                }
                Ok(RawDay(segments))
            }
        }

        deserializer.deserialize_map(DayVisitor)
    }
}

impl<'de> Deserialize<'de> for RawSegment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SegmentVisitor;

        impl<'de> Visitor<'de> for SegmentVisitor {
            type Value = RawSegment;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array whose first element is a list of color entries")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<RawSegment, A::Error> {
                let entries = seq.next_element::<Vec<String>>()?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(RawSegment(entries))
            }
        }

        deserializer.deserialize_seq(SegmentVisitor)
    }
}

/// Loader for schedule datasets
pub struct DatasetParser;

impl DatasetParser {
    /// Read and parse a dataset file
    pub fn parse_file(path: &Path) -> Result<Vec<DaySchedule>> {
        let mut bytes = std::fs::read(path)?;
        Self::parse_bytes(&mut bytes)
    }

    /// Parse a dataset from raw JSON bytes (simd-json parses in place)
    pub fn parse_bytes(bytes: &mut [u8]) -> Result<Vec<DaySchedule>> {
        let raw: RawDataset =
            simd_json::serde::from_slice(bytes).map_err(|e| WeekgridError::Parse(e.to_string()))?;

        raw.0
            .into_iter()
            .map(|(key, day)| Self::build_day(key, day))
            .collect()
    }

    /// Validate one day and sort its segments by boundary
    fn build_day(key: String, raw: RawDay) -> Result<DaySchedule> {
        let date = parse_date(&key)?;

        let mut segments = Vec::with_capacity(raw.0.len());
        let mut seen = HashSet::with_capacity(raw.0.len());
        for (boundary_key, segment) in raw.0 {
            if !seen.insert(boundary_key.clone()) {
                return Err(WeekgridError::DuplicateTimeBoundary {
                    day: key,
                    key: boundary_key,
                });
            }
            let end = parse_boundary(&key, &boundary_key)?;
            let entries = segment
                .0
                .ok_or_else(|| WeekgridError::MalformedColorSpec {
                    day: key.clone(),
                    boundary: boundary_key.clone(),
                    entry: String::new(),
                    reason: "missing color list".to_string(),
                })?;
            let spec = parse_segment_spec(&key, &boundary_key, &entries)?;
            segments.push(Segment { end, spec });
        }
        segments.sort_by_key(|s| s.end.value);

        Ok(DaySchedule {
            key,
            date,
            segments,
        })
    }
}
