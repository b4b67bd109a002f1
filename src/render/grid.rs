//! Week grid: 24 hour columns x 7 weekday rows

use super::canvas::Canvas;
use super::segment::day_ops;
use crate::types::{Result, Rgb, Week, WeekgridError};

/// Hour columns
pub const GRID_COLUMNS: u32 = 24;
/// Weekday rows (Mon..Sun)
pub const GRID_ROWS: u32 = 7;

const BACKGROUND: Rgb = Rgb::WHITE;
const BORDER_COLOR: Rgb = Rgb::BLACK;

/// Pixel size of the week image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub border_width: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            border_width: 3,
        }
    }
}

impl GridConfig {
    /// Reject canvases too small to give every cell a pixel
    pub fn validate(&self) -> Result<()> {
        if self.width < GRID_COLUMNS || self.height < GRID_ROWS {
            return Err(WeekgridError::Config(format!(
                "grid {}x{} too small (minimum {}x{})",
                self.width, self.height, GRID_COLUMNS, GRID_ROWS
            )));
        }
        Ok(())
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry {
            cell_width: self.width as f64 / GRID_COLUMNS as f64,
            cell_height: self.height as f64 / GRID_ROWS as f64,
        }
    }
}

/// Cell size in (fractional) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub cell_width: f64,
    pub cell_height: f64,
}

/// Renders one week block into a fresh canvas
pub struct GridRenderer {
    config: GridConfig,
}

impl GridRenderer {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Paint every day of the week, then overlay the grid lines
    pub fn render(&self, week: &Week) -> Canvas {
        let geometry = self.config.geometry();
        let mut canvas = Canvas::new(self.config.width, self.config.height, BACKGROUND);

        for day in &week.days {
            canvas.apply(&day_ops(day, &geometry));
        }

        self.draw_borders(&mut canvas, &geometry);
        canvas
    }

    /// One outline per row band and per column band
    fn draw_borders(&self, canvas: &mut Canvas, geometry: &GridGeometry) {
        let width = self.config.width as i64;
        let height = self.config.height as i64;
        let stroke = self.config.border_width;

        for row in 0..GRID_ROWS {
            let y0 = (row as f64 * geometry.cell_height) as i64;
            let y1 = ((row + 1) as f64 * geometry.cell_height) as i64;
            canvas.stroke_rect(0, y0, width, y1, stroke, BORDER_COLOR);
        }

        for col in 0..GRID_COLUMNS {
            let x0 = (col as f64 * geometry.cell_width) as i64;
            let x1 = ((col + 1) as f64 * geometry.cell_width) as i64;
            canvas.stroke_rect(x0, 0, x1, height, stroke, BORDER_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::DatasetParser;
    use chrono::NaiveDate;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);
    const GREEN: Rgb = Rgb::new(0, 128, 0);

    fn week_from(json: &str) -> Week {
        let mut bytes = json.as_bytes().to_vec();
        let days = DatasetParser::parse_bytes(&mut bytes).unwrap();
        Week {
            start_key: days[0].key.clone(),
            start_date: days[0].date,
            days,
            is_final: true,
        }
    }

    // ========== GridConfig tests ==========

    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert_eq!((config.width, config.height, config.border_width), (1920, 1080, 3));
        let g = config.geometry();
        assert_eq!(g.cell_width, 80.0);
        assert!((g.cell_height - 1080.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_config_too_small() {
        let config = GridConfig {
            width: 23,
            height: 100,
            border_width: 1,
        };
        assert!(matches!(config.validate(), Err(WeekgridError::Config(_))));
        assert!(GridRenderer::new(config).is_err());
    }

    // ========== render tests ==========

    #[test]
    fn test_render_end_to_end() {
        let week = week_from(r#"{"01 Jan 2024": {"0800": [["1-red","1-blue"]], "1800": [["green"]]}}"#);
        let renderer = GridRenderer::new(GridConfig::default()).unwrap();
        let canvas = renderer.render(&week);

        assert_eq!((canvas.width(), canvas.height()), (1920, 1080));
        // hour 0-8: red over blue
        assert_eq!(canvas.pixel(40, 30), RED);
        assert_eq!(canvas.pixel(40, 120), BLUE);
        // hour 8-18: green, full height
        assert_eq!(canvas.pixel(700, 30), GREEN);
        assert_eq!(canvas.pixel(700, 120), GREEN);
        // after 18:00 the background shows through
        assert_eq!(canvas.pixel(1500, 50), Rgb::WHITE);
        // other weekdays untouched
        assert_eq!(canvas.pixel(40, 300), Rgb::WHITE);
    }

    #[test]
    fn test_render_grid_lines() {
        let week = week_from(r#"{"01 Jan 2024": {"2400": [["red"]]}}"#);
        let renderer = GridRenderer::new(GridConfig::default()).unwrap();
        let canvas = renderer.render(&week);

        // outer top/left edges
        assert_eq!(canvas.pixel(500, 0), Rgb::BLACK);
        assert_eq!(canvas.pixel(0, 500), Rgb::BLACK);
        // column line between hour 0 and hour 1 (x = 80)
        assert_eq!(canvas.pixel(79, 500), Rgb::BLACK);
        assert_eq!(canvas.pixel(81, 500), Rgb::BLACK);
        // row line between Monday and Tuesday (y = 154)
        assert_eq!(canvas.pixel(500, 154), Rgb::BLACK);
        // border drawn over painted cells
        assert_eq!(canvas.pixel(80, 40), Rgb::BLACK);
        assert_eq!(canvas.pixel(40, 40), RED);
    }

    #[test]
    fn test_render_empty_week() {
        let week = Week {
            start_key: "01 Jan 2024".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            days: Vec::new(),
            is_final: false,
        };
        let config = GridConfig {
            width: 240,
            height: 70,
            border_width: 1,
        };
        let canvas = GridRenderer::new(config).unwrap().render(&week);
        assert_eq!(canvas.pixel(5, 5), Rgb::WHITE);
        assert_eq!(canvas.pixel(10, 5), Rgb::BLACK);
    }
}
