use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::canon::{normalize, NormConfig};
use crate::classify::{ClassificationResult, Classifier};
use crate::error::Result;
use crate::raster::RasterImage;
use crate::tensor::NormalizedTensor;

/// Normalization config bound to the classifier it feeds.
///
/// Construction validates the config and checks it against the classifier's
/// training convention, so a `Recognizer` that exists is known to produce
/// tensors the classifier understands. Cheap to clone; clones share the
/// classifier.
#[derive(Clone)]
pub struct Recognizer {
    classifier: Arc<dyn Classifier>,
    config: NormConfig,
}

impl Recognizer {
    pub fn new(classifier: Arc<dyn Classifier>, config: NormConfig) -> Result<Recognizer> {
        config.validate()?;
        config.check_against(classifier.input_convention())?;
        info!(?config, "recognizer ready");
        Ok(Recognizer { classifier, config })
    }

    pub fn config(&self) -> &NormConfig {
        &self.config
    }

    /// Decodes, normalizes and classifies an uploaded file.
    pub fn recognize_bytes(&self, bytes: &[u8]) -> Result<ClassificationResult> {
        let image = RasterImage::decode(bytes)?;
        self.recognize(&image)
    }

    pub fn recognize(&self, image: &RasterImage) -> Result<ClassificationResult> {
        let started = Instant::now();
        let tensor = self.normalize(image)?;
        let probabilities = self.classifier.classify(&tensor)?;
        let result = ClassificationResult::from_probabilities(probabilities)?;
        debug!(
            width = image.width(),
            height = image.height(),
            best = %result.best().label,
            elapsed = ?started.elapsed(),
            "recognized"
        );
        Ok(result)
    }

    pub fn normalize(&self, image: &RasterImage) -> Result<NormalizedTensor> {
        normalize(image, &self.config)
    }
}

impl std::fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognizer")
            .field("config", &self.config)
            .field("convention", self.classifier.input_convention())
            .finish()
    }
}
