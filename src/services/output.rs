//! Output sinks for rendered week images

use std::path::{Path, PathBuf};

use crate::render::Canvas;
use crate::types::Result;

/// A rendered week ready to be persisted
pub struct WeekImage {
    pub canvas: Canvas,
    /// File name without extension
    pub file_stem: String,
    /// Date key of the week's first day
    pub week_start: String,
    pub day_count: usize,
    /// Week holding the dataset's last day
    pub is_final_week: bool,
}

/// Receives each week image as soon as it is rendered
pub trait OutputSink {
    fn emit(&mut self, image: WeekImage) -> Result<()>;
}

type FinalWeekHook = Box<dyn FnMut(&WeekImage, &Path) -> Result<()>>;

/// Writes `<dir>/<stem>.png` for every week
pub struct PngSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
    on_final_week: Option<FinalWeekHook>,
}

impl PngSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
            on_final_week: None,
        }
    }

    /// Run `hook` once the final week's file has been written
    pub fn with_final_week_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&WeekImage, &Path) -> Result<()> + 'static,
    {
        self.on_final_week = Some(Box::new(hook));
        self
    }

    /// Paths written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn path_for(&self, file_stem: &str) -> PathBuf {
        self.dir.join(format!("{}.png", file_stem))
    }
}

impl OutputSink for PngSink {
    fn emit(&mut self, image: WeekImage) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(&image.file_stem);
        if self.written.contains(&path) {
            log::warn!(
                "{} already written in this run, overwriting with week of {}",
                path.display(),
                image.week_start
            );
        }
        image.canvas.save_png(&path)?;
        log::info!(
            "wrote {} ({} day{})",
            path.display(),
            image.day_count,
            if image.day_count == 1 { "" } else { "s" }
        );

        if image.is_final_week {
            if let Some(hook) = self.on_final_week.as_mut() {
                hook(&image, &path)?;
            }
        }

        self.written.push(path);
        Ok(())
    }
}

/// Keeps images in memory; used by tests and callers that post-process
#[derive(Default)]
pub struct MemorySink {
    pub images: Vec<WeekImage>,
}

impl OutputSink for MemorySink {
    fn emit(&mut self, image: WeekImage) -> Result<()> {
        self.images.push(image);
        Ok(())
    }
}
