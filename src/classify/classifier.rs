use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tensor::{Channels, NormalizedTensor, ValueScale};

/// Whether ink is brighter or darker than the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkPolarity {
    /// White strokes on black, the usual training convention.
    LightOnDark,
    /// Black strokes on white, the usual drawing convention.
    DarkOnLight,
}

impl std::fmt::Display for InkPolarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InkPolarity::LightOnDark => write!(f, "light-on-dark"),
            InkPolarity::DarkOnLight => write!(f, "dark-on-light"),
        }
    }
}

/// The tensor layout a classifier was trained on.
///
/// Shipped alongside the weights; the recognizer checks its normalization
/// config against it once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConvention {
    pub height: u32,
    pub width: u32,
    pub channels: Channels,
    pub ink: InkPolarity,
    pub scale: ValueScale,
}

impl InputConvention {
    /// Number of scalar inputs: height × width × channels.
    pub fn input_len(&self) -> usize {
        self.height as usize * self.width as usize * self.channels.count()
    }
}

/// A pretrained scoring function over the 62 glyph classes.
///
/// Implementations are loaded once and shared read-only across request
/// threads, so `classify` takes `&self`. A scorer that cannot be called
/// concurrently must do its own locking.
pub trait Classifier: Send + Sync {
    fn input_convention(&self) -> &InputConvention;

    /// Probability per class, indexed like `CLASS_LABELS`.
    fn classify(&self, tensor: &NormalizedTensor) -> Result<Vec<f64>>;
}
