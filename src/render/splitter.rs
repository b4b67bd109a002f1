//! Weighted vertical split of a segment's height

use crate::types::{ColorSegmentSpec, Fill};

/// Split `height` among the spec's entries in proportion to their weights.
///
/// Entry order is preserved (top to bottom). A zero total weight yields
/// zero heights for every entry rather than an error.
pub fn split_heights(spec: &ColorSegmentSpec, height: f64) -> Vec<(&Fill, f64)> {
    let total_weight = spec.total_weight();
    let unit_height = if total_weight > 0 {
        height / total_weight as f64
    } else {
        0.0
    };

    spec.entries
        .iter()
        .map(|entry| (&entry.fill, entry.weight as f64 * unit_height))
        .collect()
}
