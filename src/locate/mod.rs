pub mod bounding_box;
pub mod foreground;

pub use bounding_box::BoundingBox;
pub use foreground::{locate, locate_gray, Background, ForegroundMask};
