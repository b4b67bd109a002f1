//! Services for week grouping, rendering and output

pub mod output;
pub mod render_service;
pub mod week;

pub use output::{MemorySink, OutputSink, PngSink, WeekImage};
pub use render_service::{RenderService, RenderSummary};
pub use week::WeekAccumulator;
