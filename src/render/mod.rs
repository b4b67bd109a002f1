//! Rendering: weighted splits, day rows, week grid and raster output

mod canvas;
mod grid;
mod segment;
mod splitter;

pub use canvas::Canvas;
pub use grid::{GridConfig, GridGeometry, GridRenderer, GRID_COLUMNS, GRID_ROWS};
pub use segment::{
    composite_ops, day_ops, day_spans, DrawOp, RectF, Span, SUBGRID_COLUMNS, SUBGRID_ROWS,
};
pub use splitter::split_heights;
