//! Raster surface with the two primitives the grid needs

use image::RgbImage;
use std::path::Path;

use super::segment::{DrawOp, RectF};
use crate::types::{Result, Rgb};

/// Owned RGB canvas for one week image
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background.to_image()),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b] = self.image.get_pixel(x, y).0;
        Rgb::new(r, g, b)
    }

    /// Fill pixels `round(x0)..round(x1)` x `round(y0)..round(y1)`,
    /// clipped to the canvas. Neighbouring rectangles sharing an edge
    /// never overlap.
    pub fn fill_rect(&mut self, rect: RectF, color: Rgb) {
        let (x0, x1) = clip_span(rect.x0, rect.x1, self.width());
        let (y0, y1) = clip_span(rect.y0, rect.y1, self.height());
        let pixel = color.to_image();
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, pixel);
            }
        }
    }

    /// Outline with inclusive integer corners, `width` frames drawn inward
    pub fn stroke_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, width: u32, color: Rgb) {
        for inset in 0..width as i64 {
            let (left, top, right, bottom) = (x0 + inset, y0 + inset, x1 - inset, y1 - inset);
            if left > right || top > bottom {
                break;
            }
            for x in left..=right {
                self.put_clipped(x, top, color);
                self.put_clipped(x, bottom, color);
            }
            for y in top..=bottom {
                self.put_clipped(left, y, color);
                self.put_clipped(right, y, color);
            }
        }
    }

    fn put_clipped(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64 {
            self.image.put_pixel(x as u32, y as u32, color.to_image());
        }
    }

    /// Apply draw instructions in order
    pub fn apply(&mut self, ops: &[DrawOp]) {
        for op in ops {
            self.fill_rect(op.rect, op.color);
        }
    }

    /// Encode as PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Round a float span to whole pixels within `0..=limit`
fn clip_span(start: f64, end: f64, limit: u32) -> (u32, u32) {
    let clamp = |v: f64| v.round().clamp(0.0, limit as f64) as u32;
    (clamp(start), clamp(end))
}
