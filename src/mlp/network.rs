use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::{labels, softmax, Classifier, InputConvention, CLASS_COUNT};
use crate::error::{GlyphError, Result};
use crate::mlp::activation::ActivationFunction;
use crate::mlp::dense::Layer;
use crate::tensor::NormalizedTensor;

/// On-disk form of a trained network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    /// Layout the network was trained on.
    pub input: InputConvention,
    #[serde(default)]
    pub description: Option<String>,
    /// Output labels, if the exporter wrote them; must equal the fixed table.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    pub layers: Vec<Layer>,
}

/// Feed-forward network over the flattened HWC tensor.
///
/// Forward passes keep no state, so one instance serves every thread.
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    convention: InputConvention,
    layers: Vec<Layer>,
}

impl MlpClassifier {
    /// Validates a parsed model: layer shapes chain from the input size to
    /// exactly 62 outputs, and any stored labels match the class table.
    pub fn from_model(model: ModelFile) -> Result<MlpClassifier> {
        if model.layers.is_empty() {
            return Err(GlyphError::classifier("model has no layers"));
        }
        let mut expected_in = model.input.input_len();
        for (i, layer) in model.layers.iter().enumerate() {
            if let Some(reason) = layer.shape_error() {
                return Err(GlyphError::classifier(format!("layer {}: {}", i, reason)));
            }
            if layer.input_size() != expected_in {
                return Err(GlyphError::classifier(format!(
                    "layer {} expects {} inputs, previous stage produces {}",
                    i,
                    layer.input_size(),
                    expected_in
                )));
            }
            expected_in = layer.size();
        }
        if expected_in != CLASS_COUNT {
            return Err(GlyphError::classifier(format!(
                "model produces {} outputs, expected {}",
                expected_in, CLASS_COUNT
            )));
        }
        if let Some(stored) = &model.labels {
            if !labels::matches_table(stored) {
                return Err(GlyphError::mismatch(
                    "class labels",
                    "0-9A-Za-z",
                    stored.concat(),
                ));
            }
        }
        Ok(MlpClassifier { convention: model.input, layers: model.layers })
    }

    /// Deserializes and validates a model JSON file.
    pub fn load_json(path: &Path) -> Result<MlpClassifier> {
        let file = std::fs::File::open(path)
            .map_err(|e| GlyphError::classifier_with(format!("cannot open {}", path.display()), e))?;
        let reader = std::io::BufReader::new(file);
        let model: ModelFile = serde_json::from_reader(reader)
            .map_err(|e| GlyphError::classifier_with(format!("cannot parse {}", path.display()), e))?;
        let classifier = MlpClassifier::from_model(model)?;
        info!(
            path = %path.display(),
            layers = classifier.layers.len(),
            input = ?classifier.convention,
            "model loaded"
        );
        Ok(classifier)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Raw network output for a flattened input.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        current
    }
}

impl Classifier for MlpClassifier {
    fn input_convention(&self) -> &InputConvention {
        &self.convention
    }

    fn classify(&self, tensor: &NormalizedTensor) -> Result<Vec<f64>> {
        let c = &self.convention;
        let expected = (c.height as usize, c.width as usize, c.channels.count());
        if tensor.shape() != expected {
            return Err(GlyphError::mismatch(
                "tensor shape",
                format!("{:?}", expected),
                format!("{:?}", tensor.shape()),
            ));
        }
        let input: Vec<f64> = tensor.as_slice().iter().map(|&v| v as f64).collect();
        let output = self.forward(&input);
        let ends_in_softmax = self
            .layers
            .last()
            .map_or(false, |l| l.activator == ActivationFunction::Softmax);
        if ends_in_softmax {
            Ok(output)
        } else {
            Ok(softmax(&output))
        }
    }
}
