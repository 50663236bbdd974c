// Word cloud drawing with the plotters bitmap backend.
//
// Layout runs first against a scratch 1x1 in-memory area that is only used
// for text measurement. The output file is created afterwards, so a failed
// layout never leaves a half-written image behind.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use super::layout::{layout, LayoutOptions, PlacedWord, TextMeasure};
use super::mask::Mask;
use crate::text::frequency::FrequencyTable;

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct WordCloud {
    pub layout: LayoutOptions,
    pub background: RGBColor,
    /// Font family resolved by the system font lookup (default "sans-serif")
    pub font_family: String,
}

impl Default for WordCloud {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            background: WHITE,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl WordCloud {
    /// Load the mask, lay out the words and write a PNG to `output`.
    /// Returns the number of words drawn.
    pub fn render(&self, table: &FrequencyTable, mask_path: &Path, output: &Path) -> Result<usize> {
        let mask = Mask::load(mask_path)?;
        self.render_with_mask(table, &mask, output)
    }

    pub fn render_with_mask(
        &self,
        table: &FrequencyTable,
        mask: &Mask,
        output: &Path,
    ) -> Result<usize> {
        let placed = self.place(table, mask)?;
        if placed.is_empty() {
            anyhow::bail!(
                "No word fits inside the mask ({}x{}, {} free pixels)",
                mask.width(),
                mask.height(),
                mask.free_cells()
            );
        }

        let root = BitMapBackend::new(output, (mask.width(), mask.height())).into_drawing_area();
        root.fill(&self.background)
            .map_err(|e| anyhow!("Failed to paint background: {e}"))?;

        for word in &placed {
            let style = (self.font_family.as_str(), f64::from(word.font_size))
                .into_font()
                .color(&HSLColor(word.hue, 0.8, 0.45));
            root.draw_text(&word.text, &style, (word.x as i32, word.y as i32))
                .map_err(|e| anyhow!("Failed to draw '{}': {e}", word.text))?;
        }

        root.present()
            .map_err(|e| anyhow!("Failed to write {}: {e}", output.display()))?;

        info!(
            output = %output.display(),
            words = placed.len(),
            "Word cloud written"
        );
        Ok(placed.len())
    }

    /// Run layout only, measuring with the configured font.
    pub fn place(&self, table: &FrequencyTable, mask: &Mask) -> Result<Vec<PlacedWord>> {
        let mut scratch = vec![0u8; 3];
        let area = BitMapBackend::with_buffer(&mut scratch, (1, 1)).into_drawing_area();
        let measure = PlottersMeasure {
            area: &area,
            family: &self.font_family,
        };
        layout(table, mask, &measure, &self.layout)
    }
}

/// Text measurement through a plotters drawing area.
struct PlottersMeasure<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    family: &'a str,
}

impl<DB: DrawingBackend> TextMeasure for PlottersMeasure<'_, DB> {
    fn measure(&self, text: &str, font_size: u32) -> Result<(u32, u32)> {
        let style = (self.family, f64::from(font_size)).into_font().color(&BLACK);
        self.area.estimate_text_size(text, &style).map_err(|e| {
            anyhow!(
                "Failed to measure text with font '{}' (is it installed?): {e}",
                self.family
            )
        })
    }
}

/// Parse a background colour: "#rrggbb", "rrggbb" or a basic colour name.
pub fn parse_color(raw: &str) -> Result<RGBColor> {
    let value = raw.trim().to_lowercase();
    let named = match value.as_str() {
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "cyan" => Some(CYAN),
        "magenta" => Some(MAGENTA),
        "gray" | "grey" => Some(RGBColor(128, 128, 128)),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    let hex = value.strip_prefix('#').unwrap_or(&value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Invalid colour '{raw}': expected #rrggbb or a colour name");
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
