use image::GrayImage;
use tracing::debug;

use crate::canon::geometry::{add_margin, crop, invert_intensity, margin_for, pad_to_square, resize};
use crate::canon::norm_config::NormConfig;
use crate::error::{GlyphError, Result};
use crate::locate::locate_gray;
use crate::raster::RasterImage;
use crate::tensor::NormalizedTensor;

/// Runs the full crop → margin → square → resize → invert → scale →
/// replicate sequence.
///
/// Pure function of its inputs. A blank image is `Err(EmptyContent)`, never a
/// tensor.
pub fn normalize(image: &RasterImage, cfg: &NormConfig) -> Result<NormalizedTensor> {
    let canonical = canonical_image(image, cfg)?;
    Ok(NormalizedTensor::from_gray(&canonical, cfg.channels, cfg.scale))
}

/// The single-channel, target-sized, polarity-corrected image that
/// [`normalize`] scales into a tensor.
pub fn canonical_image(image: &RasterImage, cfg: &NormConfig) -> Result<GrayImage> {
    cfg.validate()?;

    let gray = image.to_luma();
    let bbox = locate_gray(&gray, cfg.background).ok_or(GlyphError::EmptyContent)?;
    let fill = cfg.background.fill();

    let cropped = crop(&gray, bbox);
    let margin = margin_for(cropped.width(), cropped.height(), cfg.margin_ratio);
    let framed = add_margin(&cropped, margin, fill);
    let square = pad_to_square(&framed, fill);
    debug!(
        crop_w = cropped.width(),
        crop_h = cropped.height(),
        margin,
        side = square.width(),
        "canonical geometry"
    );

    let mut out = resize(&square, cfg.target_size);
    if cfg.invert_intensity {
        invert_intensity(&mut out);
    }
    Ok(out)
}
