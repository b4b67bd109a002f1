//! Terminal preview of a rendered week image
//!
//! Each terminal cell shows two image pixels stacked vertically using an
//! upper half block: foreground = top sample, background = bottom sample.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use image::RgbImage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::render::GRID_ROWS;
use crate::types::Result;

const UPPER_HALF: &str = "▀";
const LABEL_WIDTH: u16 = 4; // "Mon " prefix
const MAX_PREVIEW_WIDTH: u16 = 124;

/// Weekday labels, one per grid row
const DAY_LABELS: [&str; GRID_ROWS as usize] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Half-block rendering of a week image with weekday labels
pub struct WeekPreview<'a> {
    image: &'a RgbImage,
}

impl<'a> WeekPreview<'a> {
    pub fn new(image: &'a RgbImage) -> Self {
        Self { image }
    }

    /// Preview size for a terminal `columns` wide, keeping the image
    /// aspect ratio (two pixel rows per text row)
    pub fn size_for_width(&self, columns: u16) -> (u16, u16) {
        let width = columns.clamp(LABEL_WIDTH + 1, MAX_PREVIEW_WIDTH);
        let (w, h) = self.image.dimensions();
        if w == 0 {
            return (width, 1);
        }
        let pixel_columns = (width - LABEL_WIDTH) as u64;
        let rows = (pixel_columns * h as u64 / w as u64 / 2).max(1);
        (width, rows.min(u16::MAX as u64) as u16)
    }
}

/// Pixel index at the center of cell `index` out of `count` over `dim` pixels
fn sample(dim: u32, index: u32, count: u32) -> u32 {
    let pos = (2 * index as u64 + 1) * dim as u64 / (2 * count as u64);
    (pos as u32).min(dim.saturating_sub(1))
}

fn pixel_color(image: &RgbImage, x: u32, y: u32) -> Color {
    let [r, g, b] = image.get_pixel(x, y).0;
    Color::Rgb(r, g, b)
}

impl Widget for WeekPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = self.image.dimensions();
        if area.width <= LABEL_WIDTH || area.height == 0 || w == 0 || h == 0 {
            return;
        }

        let columns = (area.width - LABEL_WIDTH) as u32;
        let pixel_rows = area.height as u32 * 2;

        for row in 0..area.height {
            let top = sample(h, row as u32 * 2, pixel_rows);
            let bottom = sample(h, row as u32 * 2 + 1, pixel_rows);
            for col in 0..columns {
                let x = sample(w, col, columns);
                let position = (area.x + LABEL_WIDTH + col as u16, area.y + row);
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(pixel_color(self.image, x, top))
                        .set_bg(pixel_color(self.image, x, bottom));
                }
            }
        }

        // Label each weekday band at its vertical center
        for (day_idx, label) in DAY_LABELS.iter().enumerate() {
            let center = (2 * day_idx as u32 + 1) * area.height as u32 / (2 * GRID_ROWS);
            buf.set_string(
                area.x,
                area.y + center as u16,
                label,
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}

fn to_terminal_color(color: Color) -> TermColor {
    match color {
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::DarkGray => TermColor::DarkGrey,
        _ => TermColor::Reset,
    }
}

/// Write a rendered buffer to `out` as true-color text
pub fn write_buffer(buf: &Buffer, out: &mut impl Write) -> io::Result<()> {
    let area = buf.area;
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell((x, y)) {
                queue!(
                    out,
                    SetForegroundColor(to_terminal_color(cell.fg)),
                    SetBackgroundColor(to_terminal_color(cell.bg)),
                    Print(cell.symbol())
                )?;
            }
        }
        queue!(out, ResetColor, Print("\n"))?;
    }
    out.flush()
}

/// Print a week image to stdout, sized to the terminal
pub fn show_in_terminal(image: &RgbImage, title: &str) -> Result<()> {
    let preview = WeekPreview::new(image);
    let (columns, _) = crossterm::terminal::size().unwrap_or((80, 24));
    let (width, height) = preview.size_for_width(columns);

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    preview.render(area, &mut buf);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", title)?;
    write_buffer(&buf, &mut stdout)?;
    Ok(())
}
