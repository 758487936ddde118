use image::GrayImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locate::bounding_box::BoundingBox;
use crate::raster::RasterImage;

/// On a light background, anything darker than this counts as ink.
pub const LIGHT_BACKGROUND_INK_BELOW: u8 = 250;

/// On a dark background, anything brighter than this counts as ink.
pub const DARK_BACKGROUND_INK_ABOVE: u8 = 5;

/// Which end of the intensity range the blank canvas sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// Dark ink on white paper (drawing canvas, scanned paper).
    Light,
    /// Light strokes on black.
    Dark,
}

impl Background {
    /// Fill value for padding canvases.
    pub fn fill(self) -> u8 {
        match self {
            Background::Light => 255,
            Background::Dark => 0,
        }
    }

    /// Whether a single intensity value is ink under this convention.
    ///
    /// The thresholds are asymmetric on purpose: near-white anti-aliasing on a
    /// light canvas is tolerated up to 250, while a dark canvas admits only
    /// values above 5.
    pub fn is_ink(self, value: u8) -> bool {
        match self {
            Background::Light => value < LIGHT_BACKGROUND_INK_BELOW,
            Background::Dark => value > DARK_BACKGROUND_INK_ABOVE,
        }
    }
}

/// Boolean field over an image marking ink pixels.
#[derive(Debug, Clone)]
pub struct ForegroundMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ForegroundMask {
    pub fn from_gray(gray: &GrayImage, background: Background) -> ForegroundMask {
        let cells = gray.pixels().map(|p| background.is_ink(p.0[0])).collect();
        ForegroundMask { width: gray.width(), height: gray.height(), cells }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.width + x) as usize]
    }

    /// Number of ink pixels.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Tight box around all ink; `None` when the mask is empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for (i, &ink) in self.cells.iter().enumerate() {
            if !ink {
                continue;
            }
            let x = i as u32 % self.width;
            let y = i as u32 / self.width;
            match bbox.as_mut() {
                Some(b) => b.include(x, y),
                None => bbox = Some(BoundingBox::pixel(x, y)),
            }
        }
        bbox
    }
}

/// Finds the ink region of `image`.
///
/// Returns `None` for a blank canvas; a lone ink pixel is a valid 1×1 box.
pub fn locate(image: &RasterImage, background: Background) -> Option<BoundingBox> {
    locate_gray(&image.to_luma(), background)
}

/// Same as [`locate`] for an image already reduced to one channel.
pub fn locate_gray(gray: &GrayImage, background: Background) -> Option<BoundingBox> {
    let bbox = ForegroundMask::from_gray(gray, background).bounding_box();
    debug!(?bbox, ?background, width = gray.width(), height = gray.height(), "located foreground");
    bbox
}
