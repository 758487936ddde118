pub mod normalized_tensor;

pub use normalized_tensor::{Channels, NormalizedTensor, ValueScale};
