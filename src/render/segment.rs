//! Day row -> rectangle draw instructions

use super::grid::GridGeometry;
use super::splitter::split_heights;
use crate::types::{Boundary, DaySchedule, Fill, Rgb, Segment};

/// Columns of the striped sub-grid used for composite colors
pub const SUBGRID_COLUMNS: usize = 5;
/// Rows of the striped sub-grid used for composite colors
pub const SUBGRID_ROWS: usize = 7;

/// Axis-aligned rectangle in canvas pixels, (x0, y0) top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl RectF {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// One filled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOp {
    pub rect: RectF,
    pub color: Rgb,
}

/// Time span of one segment in fractional hours
#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    pub start: f64,
    pub end: f64,
    pub segment: &'a Segment,
}

/// Pair each segment with its (previous boundary, boundary] span.
/// The first span starts at midnight. Nothing is added after the last
/// boundary, so a day ending before "2400" leaves the rest of its row
/// unpainted.
pub fn day_spans(day: &DaySchedule) -> Vec<Span<'_>> {
    let midnight = Boundary::midnight();
    let mut start = &midnight;
    let mut spans = Vec::with_capacity(day.segments.len());

    for segment in &day.segments {
        spans.push(Span {
            start: start.hours(),
            end: segment.end.hours(),
            segment,
        });
        start = &segment.end;
    }

    spans
}

/// Draw instructions covering one day's row
pub fn day_ops(day: &DaySchedule, geometry: &GridGeometry) -> Vec<DrawOp> {
    let row = day.weekday();
    let mut ops = Vec::new();

    for span in day_spans(day) {
        let width = (span.end - span.start) * geometry.cell_width;
        if width <= 0.0 {
            continue;
        }
        let x = span.start * geometry.cell_width;
        let mut y = row as f64 * geometry.cell_height;

        if span.segment.spec.total_weight() == 0 {
            log::debug!(
                "{} {}: zero total weight, nothing painted",
                day.key,
                span.segment.end.key
            );
        }

        for (fill, height) in split_heights(&span.segment.spec, geometry.cell_height) {
            if height > 0.0 {
                let rect = RectF::new(x, y, x + width, y + height);
                match fill {
                    Fill::Solid(color) => ops.push(DrawOp { rect, color: *color }),
                    Fill::Composite(colors) => ops.extend(composite_ops(rect, colors)),
                }
            }
            y += height;
        }
    }

    log::debug!("{}: {} rectangles in row {}", day.key, ops.len(), row);
    ops
}

/// Diagonal-striped 5x7 sub-grid: cell (col, row) takes
/// `colors[(col + row) % colors.len()]`
pub fn composite_ops(rect: RectF, colors: &[Rgb]) -> Vec<DrawOp> {
    if colors.is_empty() {
        return Vec::new();
    }
    let cell_width = rect.width() / SUBGRID_COLUMNS as f64;
    let cell_height = rect.height() / SUBGRID_ROWS as f64;

    let mut ops = Vec::with_capacity(SUBGRID_COLUMNS * SUBGRID_ROWS);
    for row in 0..SUBGRID_ROWS {
        for col in 0..SUBGRID_COLUMNS {
            let x0 = rect.x0 + col as f64 * cell_width;
            let y0 = rect.y0 + row as f64 * cell_height;
            ops.push(DrawOp {
                rect: RectF::new(x0, y0, x0 + cell_width, y0 + cell_height),
                color: colors[(col + row) % colors.len()],
            });
        }
    }
    ops
}
