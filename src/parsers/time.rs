//! Time boundary parsing ("HHMM" keys)

use crate::types::{Boundary, Result, WeekgridError};

/// Parse a boundary key such as "0830" into its packed HHMM value.
///
/// Any run of ASCII digits is accepted ("800" == "0800"); values past
/// 2359 are kept and simply land outside the day row.
pub fn parse_boundary(day: &str, key: &str) -> Result<Boundary> {
    let malformed = || WeekgridError::MalformedTimeBoundary {
        day: day.to_string(),
        key: key.to_string(),
    };

    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let value = key.parse::<u32>().map_err(|_| malformed())?;

    Ok(Boundary {
        key: key.to_string(),
        value,
    })
}
