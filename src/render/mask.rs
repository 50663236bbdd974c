// Mask image handling.
//
// The mask's silhouette is everything that is not pure white. White pixels
// (and fully transparent ones) are off-limits for word placement, so a
// black shape on a white background yields a cloud in that shape.

use std::path::Path;

use anyhow::{Context, Result};
use image::GrayAlphaImage;
use tracing::debug;

/// Placement mask: `true` cells are blocked.
#[derive(Debug, Clone)]
pub struct Mask {
    width: u32,
    height: u32,
    blocked: Vec<bool>,
}

impl Mask {
    /// Decode an image file into a mask.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Failed to open mask image {}", path.display()))?;
        let mask = Self::from_image(&img.to_luma_alpha8());
        debug!(
            path = %path.display(),
            width = mask.width,
            height = mask.height,
            free = mask.free_cells(),
            "Loaded mask"
        );
        Ok(mask)
    }

    /// Build from a grayscale+alpha image.
    pub fn from_image(img: &GrayAlphaImage) -> Self {
        let (width, height) = img.dimensions();
        let blocked = img
            .pixels()
            .map(|p| {
                let [luma, alpha] = p.0;
                luma == 255 || alpha == 0
            })
            .collect();
        Self {
            width,
            height,
            blocked,
        }
    }

    /// A mask with nothing blocked.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Build from a row-major blocked grid.
    pub fn from_blocked(width: u32, height: u32, blocked: Vec<bool>) -> Result<Self> {
        if blocked.len() != (width as usize) * (height as usize) {
            anyhow::bail!(
                "Mask grid has {} cells, expected {}x{}",
                blocked.len(),
                width,
                height
            );
        }
        Ok(Self {
            width,
            height,
            blocked,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_blocked(&self, x: u32, y: u32) -> bool {
        x >= self.width || y >= self.height || self.blocked[self.index(x, y)]
    }

    /// Number of cells words may occupy.
    pub fn free_cells(&self) -> usize {
        self.blocked.iter().filter(|b| !**b).count()
    }

    pub(crate) fn cells(&self) -> &[bool] {
        &self.blocked
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}
