// Unit tests for mask decoding and word layout.
//
// Layout is driven through the `TextMeasure` seam with a fixed-metrics
// stand-in, so no system fonts are needed.

use anyhow::Result;
use image::{GrayImage, Luma};

use peacecloud::render::layout::{layout, LayoutOptions, PlacedWord, TextMeasure};
use peacecloud::render::mask::Mask;
use peacecloud::render::wordcloud::{parse_color, WordCloud};
use peacecloud::text::frequency::FrequencyTable;

/// Every glyph is `size/2` wide and `size` tall.
struct FixedMeasure;

impl TextMeasure for FixedMeasure {
    fn measure(&self, text: &str, font_size: u32) -> Result<(u32, u32)> {
        let chars = text.chars().count() as u32;
        Ok(((font_size / 2).max(1) * chars, font_size))
    }
}

fn table(pairs: &[(&str, u64)]) -> FrequencyTable {
    FrequencyTable::from_pairs(pairs.iter().map(|(t, c)| (t.to_string(), *c)))
}

fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

// ============================================================
// Mask decoding
// ============================================================

#[test]
fn mask_png_white_is_blocked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mask.png");

    let mut img = GrayImage::from_pixel(10, 10, Luma([255]));
    for y in 2..8 {
        for x in 2..8 {
            img.put_pixel(x, y, Luma([0]));
        }
    }
    img.save(&path).unwrap();

    let mask = Mask::load(&path).unwrap();
    assert_eq!((mask.width(), mask.height()), (10, 10));
    assert_eq!(mask.free_cells(), 36);
    assert!(mask.is_blocked(0, 0));
    assert!(!mask.is_blocked(5, 5));
}

#[test]
fn mask_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Mask::load(&dir.path().join("nope.png")).is_err());
}

#[test]
fn mask_grid_size_checked() {
    assert!(Mask::from_blocked(2, 2, vec![false; 3]).is_err());
    assert!(Mask::from_blocked(2, 2, vec![false; 4]).is_ok());
}

// ============================================================
// Layout invariants
// ============================================================

#[test]
fn layout_respects_mask_and_other_words() {
    // Left half blocked.
    let (w, h) = (120u32, 80u32);
    let blocked: Vec<bool> = (0..h).flat_map(|_| (0..w).map(move |x| x < w / 2)).collect();
    let mask = Mask::from_blocked(w, h, blocked).unwrap();

    let words = table(&[
        ("paz", 20),
        ("justicia", 12),
        ("verdad", 9),
        ("memoria", 7),
        ("tierra", 5),
        ("vida", 3),
        ("acuerdo", 2),
        ("territorio", 1),
    ]);
    let options = LayoutOptions {
        max_font_size: Some(24),
        ..LayoutOptions::default()
    };
    let placed = layout(&words, &mask, &FixedMeasure, &options).unwrap();
    assert!(!placed.is_empty());

    for word in &placed {
        for y in word.y..word.y + word.height {
            for x in word.x..word.x + word.width {
                assert!(!mask.is_blocked(x, y), "{} covers blocked ({x},{y})", word.text);
            }
        }
    }
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(!overlaps(a, b), "{} overlaps {}", a.text, b.text);
        }
    }
}

#[test]
fn layout_honours_max_words() {
    let mask = Mask::open(400, 300);
    let words = table(&[("a", 5), ("b", 4), ("c", 3), ("d", 2), ("e", 1)]);
    let options = LayoutOptions {
        max_words: 3,
        max_font_size: Some(20),
        ..LayoutOptions::default()
    };
    let placed = layout(&words, &mask, &FixedMeasure, &options).unwrap();
    assert_eq!(placed.len(), 3);
    let texts: Vec<&str> = placed.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn layout_sizes_follow_frequency() {
    let mask = Mask::open(300, 200);
    let words = table(&[("mucho", 100), ("poco", 1)]);
    let options = LayoutOptions {
        max_font_size: Some(40),
        ..LayoutOptions::default()
    };
    let placed = layout(&words, &mask, &FixedMeasure, &options).unwrap();
    assert_eq!(placed.len(), 2);
    assert_eq!(placed[0].font_size, 40);
    assert!(placed[1].font_size < placed[0].font_size);
}

#[test]
fn layout_same_seed_same_result() {
    let mask = Mask::open(200, 150);
    let words = table(&[("uno", 9), ("dos", 6), ("tres", 3)]);
    let options = LayoutOptions {
        seed: 42,
        max_font_size: Some(30),
        ..LayoutOptions::default()
    };
    let a = layout(&words, &mask, &FixedMeasure, &options).unwrap();
    let b = layout(&words, &mask, &FixedMeasure, &options).unwrap();
    assert_eq!(a, b);
}

// ============================================================
// Renderer surface
// ============================================================

#[test]
fn render_with_missing_mask_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("cloud.png");
    let result = WordCloud::default().render(
        &table(&[("paz", 3)]),
        &dir.path().join("missing.png"),
        &output,
    );
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn colors_parse() {
    assert!(parse_color("white").is_ok());
    assert!(parse_color("#1a2b3c").is_ok());
    assert!(parse_color("mauve-ish").is_err());
}
