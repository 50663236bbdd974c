// Word placement.
//
// Words are placed most frequent first. Each word gets a font size scaled
// by its frequency relative to the top word, then a random position among
// all positions where its box fits entirely inside the free part of the
// mask. Free-space queries go through a summed-area table, so checking one
// candidate box is four lookups. If a word does not fit, its size shrinks
// step by step; once even the minimum size fails, layout stops, since every
// remaining word would be at least as hard to place.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::mask::Mask;
use crate::text::frequency::FrequencyTable;

/// Text measurement, implemented by the drawing backend.
pub trait TextMeasure {
    /// Width and height in pixels of `text` at `font_size`.
    fn measure(&self, text: &str, font_size: u32) -> Result<(u32, u32)>;
}

/// Layout tuning knobs.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Maximum number of words to place (default 2000)
    pub max_words: usize,
    /// Font size of the most frequent word; defaults to half the mask height
    pub max_font_size: Option<u32>,
    /// Smallest font size tried before layout stops (default 4)
    pub min_font_size: u32,
    /// Minimum shrink step when a word does not fit (default 1)
    pub font_step: u32,
    /// How strongly size follows frequency: 0.0 ranks only, 1.0 linear
    /// (default 0.5)
    pub relative_scaling: f64,
    /// Empty pixels kept around each word (default 2)
    pub margin: u32,
    /// Seed for positions and colours (default 1)
    pub seed: u64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_words: 2000,
            max_font_size: None,
            min_font_size: 4,
            font_step: 1,
            relative_scaling: 0.5,
            margin: 2,
            seed: 1,
        }
    }
}

/// A word with its final position and style.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: u64,
    pub font_size: u32,
    /// Top-left corner of the text box
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Hue in [0, 1) for the word colour
    pub hue: f64,
}

/// Lay out the top words of a frequency table inside a mask.
pub fn layout(
    table: &FrequencyTable,
    mask: &Mask,
    measure: &dyn TextMeasure,
    options: &LayoutOptions,
) -> Result<Vec<PlacedWord>> {
    let entries = table.top(options.max_words);
    if entries.is_empty() || mask.free_cells() == 0 {
        return Ok(Vec::new());
    }

    let mut grid = Occupancy::new(mask);
    let mut rng = StdRng::seed_from_u64(options.seed);

    let min_size = options.min_font_size.max(1);
    let max_size = options
        .max_font_size
        .unwrap_or(mask.height() / 2)
        .max(min_size);
    let max_count = entries[0].1.max(1) as f64;
    let rs = options.relative_scaling.clamp(0.0, 1.0);

    let mut placed = Vec::new();
    let mut last_size = max_size;

    'words: for (word, count) in entries {
        let relative = *count as f64 / max_count;
        let scaled = ((rs * relative + (1.0 - rs)) * max_size as f64).round() as u32;
        let mut size = scaled.min(last_size).max(min_size);

        loop {
            let (w, h) = measure.measure(word, size)?;
            let box_w = w + 2 * options.margin;
            let box_h = h + 2 * options.margin;

            if let Some((x, y)) = grid.random_free(box_w, box_h, &mut rng) {
                grid.occupy(x, y, box_w, box_h);
                placed.push(PlacedWord {
                    text: word.clone(),
                    count: *count,
                    font_size: size,
                    x: x + options.margin,
                    y: y + options.margin,
                    width: w,
                    height: h,
                    hue: rng.random_range(0.0..1.0),
                });
                last_size = size;
                break;
            }

            if size <= min_size {
                debug!(word = %word, placed = placed.len(), "No room left at minimum font size");
                break 'words;
            }
            let step = (size / 10).max(options.font_step.max(1));
            size = size.saturating_sub(step).max(min_size);
        }
    }

    debug!(
        placed = placed.len(),
        candidates = entries.len(),
        "Word cloud layout finished"
    );
    Ok(placed)
}

/// Blocked-cell grid with a summed-area table for O(1) box queries.
struct Occupancy {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    /// (width + 1) x (height + 1); `integral[r][c]` counts blocked cells
    /// in rows < r and columns < c.
    integral: Vec<u32>,
}

impl Occupancy {
    fn new(mask: &Mask) -> Self {
        let width = mask.width();
        let height = mask.height();
        let mut grid = Self {
            width,
            height,
            cells: mask.cells().to_vec(),
            integral: vec![0; (width as usize + 1) * (height as usize + 1)],
        };
        grid.rebuild_from(0, 0);
        grid
    }

    fn at(&self, row: u32, col: u32) -> u32 {
        self.integral[(row as usize) * (self.width as usize + 1) + col as usize]
    }

    /// Recompute the summed-area table for every entry affected by a
    /// change at or after cell (x0, y0).
    fn rebuild_from(&mut self, x0: u32, y0: u32) {
        let stride = self.width as usize + 1;
        for row in (y0 + 1)..=self.height {
            for col in (x0 + 1)..=self.width {
                let cell = self.cells[((row - 1) as usize) * (self.width as usize) + (col - 1) as usize];
                let value = u32::from(cell) + self.at(row - 1, col) + self.at(row, col - 1)
                    - self.at(row - 1, col - 1);
                self.integral[(row as usize) * stride + col as usize] = value;
            }
        }
    }

    /// Blocked cells inside the box at (x, y) of size w x h.
    fn blocked_in(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        self.at(y + h, x + w) + self.at(y, x) - self.at(y, x + w) - self.at(y + h, x)
    }

    /// A uniformly random top-left corner where a w x h box is fully free.
    fn random_free(&self, w: u32, h: u32, rng: &mut StdRng) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w > self.width || h > self.height {
            return None;
        }

        let positions = || {
            (0..=self.height - h)
                .flat_map(move |y| (0..=self.width - w).map(move |x| (x, y)))
                .filter(move |&(x, y)| self.blocked_in(x, y, w, h) == 0)
        };

        let hits = positions().count();
        if hits == 0 {
            return None;
        }
        let pick = rng.random_range(0..hits);
        positions().nth(pick)
    }

    fn occupy(&mut self, x: u32, y: u32, w: u32, h: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.cells[(row as usize) * (self.width as usize) + col as usize] = true;
            }
        }
        self.rebuild_from(x, y);
    }
}
