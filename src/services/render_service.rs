//! Per-file orchestration: load -> weeks -> grid -> sink

use std::path::Path;

use crate::parsers::DatasetParser;
use crate::render::{GridConfig, GridRenderer};
use crate::services::output::{OutputSink, WeekImage};
use crate::services::week::WeekAccumulator;
use crate::types::{DaySchedule, Result, WeekSummary};

/// Counts from one rendered dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub days: usize,
    pub weeks: usize,
}

/// Renders datasets into one image per week block
pub struct RenderService {
    renderer: GridRenderer,
    prefix: String,
}

impl RenderService {
    pub fn new(config: GridConfig, prefix: impl Into<String>) -> Result<Self> {
        Ok(Self {
            renderer: GridRenderer::new(config)?,
            prefix: prefix.into(),
        })
    }

    /// Load a dataset file and render every week. The whole file is
    /// validated before the first image is emitted.
    pub fn render_file(&self, path: &Path, sink: &mut dyn OutputSink) -> Result<RenderSummary> {
        log::info!("rendering {}", path.display());
        let days = load(path)?;
        self.render_days(days, sink)
    }

    /// Render already parsed days, in the given order
    pub fn render_days(
        &self,
        days: Vec<DaySchedule>,
        sink: &mut dyn OutputSink,
    ) -> Result<RenderSummary> {
        let total = days.len();
        let mut accumulator = WeekAccumulator::new();
        let mut summary = RenderSummary {
            days: total,
            weeks: 0,
        };

        for (index, day) in days.into_iter().enumerate() {
            for week in accumulator.push(day, index + 1 == total) {
                let canvas = self.renderer.render(&week);
                sink.emit(WeekImage {
                    canvas,
                    file_stem: week.file_stem(&self.prefix),
                    week_start: week.start_key.clone(),
                    day_count: week.days.len(),
                    is_final_week: week.is_final,
                })?;
                summary.weeks += 1;
            }
        }

        Ok(summary)
    }

    /// Week blocks a dataset file would produce, without rendering
    pub fn list_weeks(&self, path: &Path) -> Result<Vec<WeekSummary>> {
        let days = load(path)?;
        Ok(WeekAccumulator::group(days)
            .iter()
            .map(|week| WeekSummary::from_week(week, &self.prefix))
            .collect())
    }
}

/// Parse a dataset, logging the failure before handing it back
fn load(path: &Path) -> Result<Vec<DaySchedule>> {
    DatasetParser::parse_file(path).inspect_err(|e| {
        log::error!("{}: {}", path.display(), e);
    })
}
