pub mod classifier;
pub mod labels;
pub mod result;

pub use classifier::{Classifier, InkPolarity, InputConvention};
pub use labels::{index_of, label_for, CLASS_COUNT, CLASS_LABELS};
pub use result::{softmax, ClassificationResult, Prediction};
