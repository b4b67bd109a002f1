//! Color/weight entry parsing ("red", "2-red", "1-red,blue")

use crate::types::{ColorSegmentSpec, ColorWeightEntry, Fill, Result, WeekgridError};

/// Parse one entry. Without a `-` the weight is 1.
pub fn parse_entry(day: &str, boundary: &str, raw: &str) -> Result<ColorWeightEntry> {
    let malformed = |reason: String| WeekgridError::MalformedColorSpec {
        day: day.to_string(),
        boundary: boundary.to_string(),
        entry: raw.to_string(),
        reason,
    };

    let (weight, color) = match raw.split_once('-') {
        Some((weight, color)) => {
            let weight = weight
                .trim()
                .parse::<u32>()
                .map_err(|_| malformed(format!("invalid weight '{}'", weight)))?;
            (weight, color)
        }
        None => (1, raw),
    };

    let fill = Fill::parse(color).map_err(malformed)?;
    Ok(ColorWeightEntry { weight, fill })
}

/// Parse the ordered entry list of one segment
pub fn parse_segment_spec(day: &str, boundary: &str, raw: &[String]) -> Result<ColorSegmentSpec> {
    raw.iter()
        .map(|entry| parse_entry(day, boundary, entry))
        .collect::<Result<Vec<_>>>()
        .map(ColorSegmentSpec::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_implicit_weight() {
        let entry = parse_entry("d", "0800", "red").unwrap();
        assert_eq!(entry.weight, 1);
        assert_eq!(entry.fill, Fill::Solid(RED));
    }

    #[test]
    fn test_explicit_weight() {
        let entry = parse_entry("d", "0800", "3-blue").unwrap();
        assert_eq!(entry.weight, 3);
        assert_eq!(entry.fill, Fill::Solid(BLUE));
    }

    #[test]
    fn test_zero_weight_allowed() {
        assert_eq!(parse_entry("d", "0800", "0-red").unwrap().weight, 0);
    }

    #[test]
    fn test_weighted_composite() {
        let entry = parse_entry("d", "0800", "2-red,blue").unwrap();
        assert_eq!(entry.weight, 2);
        assert_eq!(entry.fill, Fill::Composite(vec![RED, BLUE]));
    }

    #[test]
    fn test_invalid_weight() {
        let err = parse_entry("01 Jan 2024", "0800", "x-red").unwrap_err();
        match err {
            WeekgridError::MalformedColorSpec {
                day,
                boundary,
                entry,
                reason,
            } => {
                assert_eq!(day, "01 Jan 2024");
                assert_eq!(boundary, "0800");
                assert_eq!(entry, "x-red");
                assert!(reason.contains("weight"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_color() {
        let err = parse_entry("d", "0800", "1-nope").unwrap_err();
        assert!(matches!(err, WeekgridError::MalformedColorSpec { .. }));
    }

    #[test]
    fn test_segment_spec_keeps_order() {
        let raw = vec!["1-red".to_string(), "2-blue".to_string()];
        let spec = parse_segment_spec("d", "0800", &raw).unwrap();
        assert_eq!(spec.entries.len(), 2);
        assert_eq!(spec.entries[0].fill, Fill::Solid(RED));
        assert_eq!(spec.entries[1].fill, Fill::Solid(BLUE));
        assert_eq!(spec.total_weight(), 3);
    }

    #[test]
    fn test_segment_spec_fails_on_any_bad_entry() {
        let raw = vec!["red".to_string(), "bogus".to_string()];
        assert!(parse_segment_spec("d", "0800", &raw).is_err());
    }
}
