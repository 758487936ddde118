use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

/// Channel count the classifier consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channels {
    Gray,
    Rgb,
}

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

impl std::fmt::Display for Channels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Numeric range of tensor values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueScale {
    /// 0.0 ..= 1.0, intensity divided by 255.
    Unit,
    /// 0.0 ..= 255.0, for classifiers that rescale internally.
    Raw,
}

impl ValueScale {
    /// Largest value a tensor in this scale can hold.
    pub fn max_value(self) -> f32 {
        match self {
            ValueScale::Unit => 1.0,
            ValueScale::Raw => 255.0,
        }
    }

    fn encode(self, v: u8) -> f32 {
        match self {
            ValueScale::Unit => v as f32 / 255.0,
            ValueScale::Raw => v as f32,
        }
    }

    fn decode(self, v: f32) -> u8 {
        let raw = match self {
            ValueScale::Unit => v * 255.0,
            ValueScale::Raw => v,
        };
        raw.round().clamp(0.0, 255.0) as u8
    }
}

impl std::fmt::Display for ValueScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueScale::Unit => write!(f, "[0, 1]"),
            ValueScale::Raw => write!(f, "[0, 255]"),
        }
    }
}

/// Fixed-shape classifier input, stored height × width × channels (HWC).
///
/// Built once by the canonicalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor {
    height: usize,
    width: usize,
    channels: Channels,
    scale: ValueScale,
    data: Vec<f32>,
}

impl NormalizedTensor {
    /// Scales a single-channel image and replicates it across `channels`
    /// identical planes.
    pub fn from_gray(gray: &GrayImage, channels: Channels, scale: ValueScale) -> NormalizedTensor {
        let c = channels.count();
        let mut data = Vec::with_capacity(gray.len() * c);
        for p in gray.pixels() {
            let v = scale.encode(p.0[0]);
            data.extend(std::iter::repeat(v).take(c));
        }
        NormalizedTensor {
            height: gray.height() as usize,
            width: gray.width() as usize,
            channels,
            scale,
            data,
        }
    }

    /// (height, width, channels)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels.count())
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn scale(&self) -> ValueScale {
        self.scale
    }

    pub fn get(&self, y: usize, x: usize, c: usize) -> f32 {
        let n = self.channels.count();
        self.data[(y * self.width + x) * n + c]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `max - v` for every value.
    pub fn inverted(&self) -> NormalizedTensor {
        let max = self.scale.max_value();
        NormalizedTensor {
            data: self.data.iter().map(|&v| max - v).collect(),
            ..self.clone()
        }
    }

    /// Fraction of values strictly above `threshold` (in tensor units).
    pub fn fraction_above(&self, threshold: f32) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().filter(|&&v| v > threshold).count() as f32 / self.data.len() as f32
    }

    /// First plane back as an 8-bit image, for previews.
    pub fn to_luma_image(&self) -> GrayImage {
        let n = self.channels.count();
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = self.data[(y as usize * self.width + x as usize) * n];
            Luma([self.scale.decode(v)])
        })
    }
}
