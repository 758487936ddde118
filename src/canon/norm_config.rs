use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::{InkPolarity, InputConvention};
use crate::error::{GlyphError, Result};
use crate::locate::Background;
use crate::tensor::{Channels, ValueScale};

/// Largest accepted target side.
pub const MAX_TARGET_SIDE: u32 = 1024;

/// Spatial resolution the classifier consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub height: u32,
    pub width: u32,
}

impl TargetSize {
    pub fn square(side: u32) -> TargetSize {
        TargetSize { height: side, width: side }
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Everything the canonicalizer needs to turn a raster into a tensor.
///
/// Unspecified fields in a JSON file fall back to [`NormConfig::upload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormConfig {
    pub target_size: TargetSize,
    /// Margin added on every side, as a fraction of the crop's longer side.
    pub margin_ratio: f32,
    pub background: Background,
    /// Replace every intensity `v` with `255 - v` after resizing.
    pub invert_intensity: bool,
    pub scale: ValueScale,
    pub channels: Channels,
}

impl Default for NormConfig {
    fn default() -> Self {
        NormConfig::upload()
    }
}

/// Named configurations selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Profile {
    Upload,
    LegacyCanvas,
}

impl Profile {
    pub fn config(self) -> NormConfig {
        match self {
            Profile::Upload => NormConfig::upload(),
            Profile::LegacyCanvas => NormConfig::legacy_canvas(),
        }
    }
}

impl NormConfig {
    /// The canonical pipeline: dark ink on white in, light-on-dark [0, 1] RGB out.
    pub fn upload() -> NormConfig {
        NormConfig {
            target_size: TargetSize::square(64),
            margin_ratio: 0.12,
            background: Background::Light,
            invert_intensity: true,
            scale: ValueScale::Unit,
            channels: Channels::Rgb,
        }
    }

    /// What the desktop canvas front-end used to send: tight crop, no
    /// inversion, raw 0..=255 values. Only valid against a classifier trained
    /// on dark-on-light raw input.
    pub fn legacy_canvas() -> NormConfig {
        NormConfig {
            target_size: TargetSize::square(64),
            margin_ratio: 0.0,
            background: Background::Light,
            invert_intensity: false,
            scale: ValueScale::Raw,
            channels: Channels::Rgb,
        }
    }

    /// Reads a config from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> Result<NormConfig> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GlyphError::invalid_config("file", format!("{}: {}", path.display(), e))
        })?;
        let config: NormConfig = serde_json::from_str(&text).map_err(|e| {
            GlyphError::invalid_config("file", format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let TargetSize { height, width } = self.target_size;
        if height == 0 || width == 0 || height > MAX_TARGET_SIDE || width > MAX_TARGET_SIDE {
            return Err(GlyphError::invalid_config(
                "target_size",
                format!("must be within 1..={} on both sides, got {}", MAX_TARGET_SIDE, self.target_size),
            ));
        }
        if !self.margin_ratio.is_finite() || !(0.0..1.0).contains(&self.margin_ratio) {
            return Err(GlyphError::invalid_config(
                "margin_ratio",
                format!("must be in [0, 1), got {}", self.margin_ratio),
            ));
        }
        Ok(())
    }

    /// Ink polarity of the tensors this config produces.
    pub fn output_polarity(&self) -> InkPolarity {
        let ink_light = match self.background {
            Background::Light => false,
            Background::Dark => true,
        };
        if ink_light != self.invert_intensity {
            InkPolarity::LightOnDark
        } else {
            InkPolarity::DarkOnLight
        }
    }

    /// Startup contract check against the classifier's training convention.
    ///
    /// A mismatch here produces plausible but wrong tensors at runtime with
    /// no other signal, so callers must refuse to serve on error.
    pub fn check_against(&self, convention: &InputConvention) -> Result<()> {
        let expected = TargetSize { height: convention.height, width: convention.width };
        if self.target_size != expected {
            return Err(GlyphError::mismatch("target_size", expected, self.target_size));
        }
        if self.channels != convention.channels {
            return Err(GlyphError::mismatch("channels", convention.channels, self.channels));
        }
        if self.scale != convention.scale {
            return Err(GlyphError::mismatch("scale", convention.scale, self.scale));
        }
        let polarity = self.output_polarity();
        if polarity != convention.ink {
            return Err(GlyphError::mismatch("ink polarity", convention.ink, polarity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_on_dark_unit_rgb() -> InputConvention {
        InputConvention {
            height: 64,
            width: 64,
            channels: Channels::Rgb,
            ink: InkPolarity::LightOnDark,
            scale: ValueScale::Unit,
        }
    }

    #[test]
    fn presets_are_valid() {
        NormConfig::upload().validate().unwrap();
        NormConfig::legacy_canvas().validate().unwrap();
    }

    #[test]
    fn margin_ratio_range_is_enforced() {
        for bad in [-0.1, 1.0, 1.5, f32::NAN, f32::INFINITY] {
            let cfg = NormConfig { margin_ratio: bad, ..NormConfig::upload() };
            let err = cfg.validate().unwrap_err();
            assert!(matches!(err, GlyphError::InvalidConfig { field: "margin_ratio", .. }));
        }
        let cfg = NormConfig { margin_ratio: 0.0, ..NormConfig::upload() };
        cfg.validate().unwrap();
    }

    #[test]
    fn target_size_range_is_enforced() {
        let cfg = NormConfig { target_size: TargetSize { height: 0, width: 64 }, ..NormConfig::upload() };
        assert!(cfg.validate().is_err());
        let cfg = NormConfig { target_size: TargetSize::square(MAX_TARGET_SIDE + 1), ..NormConfig::upload() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn polarity_follows_background_and_invert() {
        assert_eq!(NormConfig::upload().output_polarity(), InkPolarity::LightOnDark);
        assert_eq!(NormConfig::legacy_canvas().output_polarity(), InkPolarity::DarkOnLight);
        let dark_in = NormConfig { background: Background::Dark, invert_intensity: false, ..NormConfig::upload() };
        assert_eq!(dark_in.output_polarity(), InkPolarity::LightOnDark);
    }

    #[test]
    fn upload_preset_matches_light_on_dark_classifier() {
        NormConfig::upload().check_against(&light_on_dark_unit_rgb()).unwrap();
    }

    #[test]
    fn legacy_canvas_preset_is_rejected_by_light_on_dark_classifier() {
        let err = NormConfig::legacy_canvas()
            .check_against(&light_on_dark_unit_rgb())
            .unwrap_err();
        assert!(matches!(err, GlyphError::ConfigurationMismatch { what: "scale", .. }));

        let cfg = NormConfig { scale: ValueScale::Unit, ..NormConfig::legacy_canvas() };
        let err = cfg.check_against(&light_on_dark_unit_rgb()).unwrap_err();
        assert!(matches!(err, GlyphError::ConfigurationMismatch { what: "ink polarity", .. }));
    }

    #[test]
    fn channel_and_size_mismatches_are_reported() {
        let cfg = NormConfig { channels: Channels::Gray, ..NormConfig::upload() };
        let err = cfg.check_against(&light_on_dark_unit_rgb()).unwrap_err();
        assert!(matches!(err, GlyphError::ConfigurationMismatch { what: "channels", .. }));

        let cfg = NormConfig { target_size: TargetSize::square(28), ..NormConfig::upload() };
        let err = cfg.check_against(&light_on_dark_unit_rgb()).unwrap_err();
        assert!(matches!(err, GlyphError::ConfigurationMismatch { what: "target_size", .. }));
    }

    #[test]
    fn json_fields_default_to_upload_preset() {
        let cfg: NormConfig = serde_json::from_str(r#"{"margin_ratio": 0.25, "channels": "gray"}"#).unwrap();
        assert_eq!(cfg.margin_ratio, 0.25);
        assert_eq!(cfg.channels, Channels::Gray);
        assert_eq!(cfg.target_size, TargetSize::square(64));
        assert!(cfg.invert_intensity);
    }

    #[test]
    fn from_json_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("norm.json");
        std::fs::write(&path, r#"{"margin_ratio": 2.0}"#).unwrap();
        assert!(matches!(
            NormConfig::from_json_file(&path),
            Err(GlyphError::InvalidConfig { field: "margin_ratio", .. })
        ));
        std::fs::write(&path, r#"{"background": "dark", "invert_intensity": false}"#).unwrap();
        let cfg = NormConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.background, Background::Dark);
    }
}
