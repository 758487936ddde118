use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

use crate::canon::norm_config::TargetSize;
use crate::locate::BoundingBox;

/// Resampling filter for the final resize. Nearest and bilinear alias thin
/// strokes; Lanczos3 does not.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Copies the boxed region out of `gray`.
pub fn crop(gray: &GrayImage, bbox: BoundingBox) -> GrayImage {
    imageops::crop_imm(gray, bbox.x0, bbox.y0, bbox.width(), bbox.height()).to_image()
}

/// `round(max(width, height) * ratio)`, halves rounded away from zero.
pub fn margin_for(width: u32, height: u32, ratio: f32) -> u32 {
    (width.max(height) as f64 * ratio as f64).round() as u32
}

/// Surrounds `img` with `margin` pixels of `fill` on all four sides.
pub fn add_margin(img: &GrayImage, margin: u32, fill: u8) -> GrayImage {
    if margin == 0 {
        return img.clone();
    }
    let mut canvas = GrayImage::from_pixel(
        img.width() + 2 * margin,
        img.height() + 2 * margin,
        Luma([fill]),
    );
    imageops::replace(&mut canvas, img, margin as i64, margin as i64);
    canvas
}

/// Offset at which content of size `(width, height)` sits inside a square of
/// side `max(width, height)`.
///
/// Integer division: when the slack is odd the extra pixel goes to the
/// right/bottom edge.
pub fn square_offset(width: u32, height: u32) -> (u32, u32) {
    let side = width.max(height);
    ((side - width) / 2, (side - height) / 2)
}

/// Centers `img` on a square canvas of `fill`.
pub fn pad_to_square(img: &GrayImage, fill: u8) -> GrayImage {
    let (w, h) = img.dimensions();
    if w == h {
        return img.clone();
    }
    let side = w.max(h);
    let (left, top) = square_offset(w, h);
    let mut canvas = GrayImage::from_pixel(side, side, Luma([fill]));
    imageops::replace(&mut canvas, img, left as i64, top as i64);
    canvas
}

pub fn resize(img: &GrayImage, target: TargetSize) -> GrayImage {
    imageops::resize(img, target.width, target.height, RESIZE_FILTER)
}

/// In-place `v -> 255 - v`.
pub fn invert_intensity(img: &mut GrayImage) {
    imageops::invert(img);
}
