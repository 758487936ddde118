pub mod canon;
pub mod classify;
pub mod error;
pub mod locate;
pub mod mlp;
pub mod pipeline;
pub mod raster;
pub mod tensor;

// Convenience re-exports
pub use canon::{normalize, NormConfig, Profile, TargetSize};
pub use classify::{ClassificationResult, Classifier, InkPolarity, InputConvention, Prediction, CLASS_LABELS};
pub use error::{GlyphError, Result};
pub use locate::{locate, Background, BoundingBox, ForegroundMask};
pub use mlp::MlpClassifier;
pub use pipeline::Recognizer;
pub use raster::RasterImage;
pub use tensor::{Channels, NormalizedTensor, ValueScale};
