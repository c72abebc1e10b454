//! Confusion-matrix heatmap rendering
//!
//! Cells are colored on a fixed `[0, 1]` scale, annotated with their value,
//! and framed by label-id ticks and a colorbar. Output is PNG.

mod draw;

use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};

use self::draw::{
    contrasting_text, draw_filled_rect, draw_text, text_height, text_width, value_to_color, BLACK,
    WHITE,
};
use super::classification::NormalizedConfusion;
use crate::error::{Error, Result};

const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 130;
const MARGIN_TOP: u32 = 30;
const MARGIN_BOTTOM: u32 = 70;
const COLORBAR_GAP: u32 = 25;
const COLORBAR_WIDTH: u32 = 25;

/// Heatmap settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Write the value inside each cell
    #[serde(deserialize_with = "crate::config::deserialize_bool_lenient")]
    pub annotate: bool,
    /// Pixel size of one glyph dot
    pub glyph_scale: u32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            annotate: true,
            glyph_scale: 3,
        }
    }
}

/// Area inside the margins holding the matrix cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlotArea {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Renders normalized confusion matrices
#[derive(Clone, Debug, Default)]
pub struct ConfusionHeatmap {
    config: HeatmapConfig,
}

impl ConfusionHeatmap {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    fn plot_area(&self) -> PlotArea {
        let HeatmapConfig { width, height, .. } = self.config;
        PlotArea {
            x: MARGIN_LEFT.min(width),
            y: MARGIN_TOP.min(height),
            width: width.saturating_sub(MARGIN_LEFT + MARGIN_RIGHT),
            height: height.saturating_sub(MARGIN_TOP + MARGIN_BOTTOM),
        }
    }

    /// Render the matrix; rows are true labels, columns predicted labels
    pub fn render(&self, cm: &NormalizedConfusion) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.config.width, self.config.height, WHITE);
        let area = self.plot_area();
        let n = cm.n_classes() as u32;

        if n > 0 && area.width >= n && area.height >= n {
            self.draw_cells(&mut img, cm, area);
            self.draw_ticks(&mut img, cm.labels(), area);
        }
        self.draw_colorbar(&mut img, area);

        img
    }

    fn draw_cells(&self, img: &mut RgbImage, cm: &NormalizedConfusion, area: PlotArea) {
        let n = cm.n_classes() as u32;
        let cell_w = area.width / n;
        let cell_h = area.height / n;

        for (i, row) in cm.rows().iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let x = area.x + j as u32 * cell_w;
                let y = area.y + i as u32 * cell_h;
                let color = value_to_color(value);
                draw_filled_rect(img, x, y, cell_w, cell_h, color);

                if self.config.annotate {
                    let text = format!("{value:.2}");
                    if let Some(scale) = self.fitting_scale(&text, cell_w, cell_h) {
                        let tx = x + (cell_w - text_width(&text, scale)) / 2;
                        let ty = y + (cell_h - text_height(scale)) / 2;
                        draw_text(img, tx, ty, &text, scale, contrasting_text(color));
                    }
                }
            }
        }
    }

    /// Largest scale up to the configured one that fits the box
    fn fitting_scale(&self, text: &str, max_w: u32, max_h: u32) -> Option<u32> {
        (1..=self.config.glyph_scale.max(1))
            .rev()
            .find(|&s| text_width(text, s) <= max_w && text_height(s) <= max_h)
    }

    fn draw_ticks(&self, img: &mut RgbImage, labels: &[usize], area: PlotArea) {
        let n = labels.len() as u32;
        let cell_w = area.width / n;
        let cell_h = area.height / n;
        let scale = self.config.glyph_scale.clamp(1, 2);

        for (k, label) in labels.iter().enumerate() {
            let text = label.to_string();
            let k = k as u32;

            // row ticks, right-aligned against the plot
            let w = text_width(&text, scale);
            if w + 8 <= area.x {
                let y = area.y + k * cell_h + cell_h.saturating_sub(text_height(scale)) / 2;
                draw_text(img, area.x - 8 - w, y, &text, scale, BLACK);
            }

            // column ticks, centered under each column
            if w <= cell_w {
                let x = area.x + k * cell_w + (cell_w - w) / 2;
                draw_text(img, x, area.y + area.height + 8, &text, scale, BLACK);
            }
        }
    }

    fn draw_colorbar(&self, img: &mut RgbImage, area: PlotArea) {
        if area.height == 0 {
            return;
        }
        let x = area.x + area.width + COLORBAR_GAP;
        if x + COLORBAR_WIDTH > self.config.width {
            return;
        }

        let last = (area.height - 1).max(1) as f64;
        for dy in 0..area.height {
            let value = 1.0 - dy as f64 / last;
            draw_filled_rect(img, x, area.y + dy, COLORBAR_WIDTH, 1, value_to_color(value));
        }

        let scale = self.config.glyph_scale.clamp(1, 2);
        for step in 0..=5 {
            let value = step as f64 / 5.0;
            let text = format!("{value:.1}");
            let y_tick = area.y + ((1.0 - value) * last).round() as u32;
            let y = y_tick.saturating_sub(text_height(scale) / 2);
            let tx = x + COLORBAR_WIDTH + 6;
            if tx + text_width(&text, scale) <= self.config.width {
                draw_filled_rect(img, x + COLORBAR_WIDTH, y_tick, 4, 1, BLACK);
                draw_text(img, tx, y, &text, scale, BLACK);
            }
        }
    }

    /// Render and write a PNG, creating parent directories
    pub fn save(&self, cm: &NormalizedConfusion, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("creating {}", parent.display()), e))?;
        }
        self.render(cm).save_with_format(path, ImageFormat::Png)?;
        tracing::info!(path = %path.display(), "saved confusion matrix heatmap");
        Ok(())
    }
}
