//! Error types for the glyph recognition pipeline.

use thiserror::Error;

/// Result type alias for glyph_recognizer operations
pub type Result<T> = std::result::Result<T, GlyphError>;

/// Every failure the pipeline can surface to a caller.
#[derive(Error, Debug)]
pub enum GlyphError {
    /// Bytes could not be decoded into a raster image
    #[error("Failed to decode image: {message}")]
    InputDecode {
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// No foreground pixels were found: the input is a blank canvas
    #[error("Image contains no ink")]
    EmptyContent,

    /// A configuration field is outside its valid range
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The normalization config does not produce what the classifier was trained on
    #[error("Configuration does not match classifier convention: {what} expected {expected}, got {actual}")]
    ConfigurationMismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },

    /// The classifier failed to load, failed to score, or returned garbage
    #[error("Classifier unavailable: {reason}")]
    ClassifierUnavailable {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GlyphError {
    /// Create a decode error wrapping the underlying `image` failure
    pub fn decode(message: impl Into<String>, source: image::ImageError) -> Self {
        Self::InputDecode {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    pub fn mismatch(what: &'static str, expected: impl ToString, actual: impl ToString) -> Self {
        Self::ConfigurationMismatch {
            what,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a classifier error with no underlying cause
    pub fn classifier(reason: impl Into<String>) -> Self {
        Self::ClassifierUnavailable {
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a classifier error with context
    pub fn classifier_with<E>(reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ClassifierUnavailable {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True when the caller sent something unusable, as opposed to a service fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, GlyphError::InputDecode { .. } | GlyphError::EmptyContent)
    }

    /// Short machine-readable identifier, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            GlyphError::InputDecode { .. } => "invalid_image",
            GlyphError::EmptyContent => "empty_content",
            GlyphError::InvalidConfig { .. } => "invalid_config",
            GlyphError::ConfigurationMismatch { .. } => "configuration_mismatch",
            GlyphError::ClassifierUnavailable { .. } => "classifier_unavailable",
        }
    }

    /// Get user-friendly error description for display
    pub fn user_message(&self) -> String {
        match self {
            GlyphError::InputDecode { .. } => {
                "Could not read the image. Please upload a PNG, JPEG, BMP or GIF file.".to_string()
            }
            GlyphError::EmptyContent => {
                "Please draw a character before recognizing.".to_string()
            }
            GlyphError::InvalidConfig { field, reason } => {
                format!("Configuration error: {} {}.", field, reason)
            }
            GlyphError::ConfigurationMismatch { what, expected, actual } => format!(
                "Preprocessing does not match the model: {} should be {} but is {}.",
                what, expected, actual
            ),
            GlyphError::ClassifierUnavailable { .. } => {
                "Recognition is temporarily unavailable.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_decode_and_empty() {
        assert!(GlyphError::EmptyContent.is_client_error());
        assert!(GlyphError::InputDecode { message: "x".into(), source: None }.is_client_error());
        assert!(!GlyphError::classifier("down").is_client_error());
        assert!(!GlyphError::mismatch("channels", 3, 1).is_client_error());
    }

    #[test]
    fn mismatch_message_names_both_sides() {
        let err = GlyphError::mismatch("channels", 3, 1);
        let text = err.to_string();
        assert!(text.contains("channels"));
        assert!(text.contains("expected 3"));
        assert!(text.contains("got 1"));
        assert_eq!(err.code(), "configuration_mismatch");
    }
}
