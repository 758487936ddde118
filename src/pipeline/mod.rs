pub mod recognizer;

pub use recognizer::Recognizer;
