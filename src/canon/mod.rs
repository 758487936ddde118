pub mod canonicalize;
pub mod geometry;
pub mod norm_config;

pub use canonicalize::{canonical_image, normalize};
pub use norm_config::{NormConfig, Profile, TargetSize};
