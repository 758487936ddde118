use serde::Serialize;

use crate::classify::labels::{index_of, CLASS_COUNT, CLASS_LABELS};
use crate::error::{GlyphError, Result};

/// Tolerance for a probability vector's sum.
const SUM_TOLERANCE: f64 = 1e-3;

/// One ranked class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: char,
    pub confidence: f64,
}

/// Probability over the 62 classes for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    probabilities: Vec<f64>,
}

impl ClassificationResult {
    /// Accepts a classifier's output after checking it is a distribution
    /// over exactly the 62 labels.
    pub fn from_probabilities(probabilities: Vec<f64>) -> Result<ClassificationResult> {
        if probabilities.len() != CLASS_COUNT {
            return Err(GlyphError::classifier(format!(
                "expected {} scores, got {}",
                CLASS_COUNT,
                probabilities.len()
            )));
        }
        if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(GlyphError::classifier("scores contain negative or non-finite values"));
        }
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(GlyphError::classifier(format!("scores sum to {:.6}, not 1", sum)));
        }
        Ok(ClassificationResult { probabilities })
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn probability_of(&self, label: char) -> Option<f64> {
        index_of(label).map(|i| self.probabilities[i])
    }

    /// The most likely class. Ties go to the lower index.
    pub fn best(&self) -> Prediction {
        self.ranked()[0]
    }

    /// The `k` most likely classes in descending order.
    pub fn top_k(&self, k: usize) -> Vec<Prediction> {
        let mut ranked = self.ranked();
        ranked.truncate(k);
        ranked
    }

    fn ranked(&self) -> Vec<Prediction> {
        let mut order: Vec<usize> = (0..CLASS_COUNT).collect();
        order.sort_by(|&a, &b| {
            self.probabilities[b]
                .total_cmp(&self.probabilities[a])
                .then(a.cmp(&b))
        });
        order
            .into_iter()
            .map(|i| Prediction { label: CLASS_LABELS[i], confidence: self.probabilities[i] })
            .collect()
    }
}

/// Numerically stable softmax. The denominator is clamped away from zero.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|&s| (s - max).exp()).collect();
    let sum = exps.iter().sum::<f64>().max(1e-9);
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peaked(at: usize, p: f64) -> Vec<f64> {
        let rest = (1.0 - p) / (CLASS_COUNT - 1) as f64;
        (0..CLASS_COUNT).map(|i| if i == at { p } else { rest }).collect()
    }

    #[test]
    fn best_and_top_k_rank_descending() {
        let mut probs = peaked(10, 0.7);
        probs[36] += 0.02;
        probs[10] -= 0.02;
        probs[0] += 0.01;
        probs[10] -= 0.01;
        let result = ClassificationResult::from_probabilities(probs).unwrap();
        assert_eq!(result.best().label, 'A');
        let top = result.top_k(3);
        assert_eq!(top.iter().map(|p| p.label).collect::<String>(), "Aa0");
        assert!(top[0].confidence > top[1].confidence);
        assert!(top[1].confidence > top[2].confidence);
        assert_eq!(result.top_k(100).len(), CLASS_COUNT);
    }

    #[test]
    fn ties_prefer_lower_index() {
        let uniform = vec![1.0 / CLASS_COUNT as f64; CLASS_COUNT];
        let result = ClassificationResult::from_probabilities(uniform).unwrap();
        assert_eq!(result.best().label, '0');
        assert_eq!(result.top_k(2)[1].label, '1');
    }

    #[test]
    fn malformed_vectors_are_classifier_errors() {
        let short = vec![0.5, 0.5];
        assert!(matches!(
            ClassificationResult::from_probabilities(short),
            Err(GlyphError::ClassifierUnavailable { .. })
        ));
        let mut nan = peaked(0, 0.9);
        nan[3] = f64::NAN;
        assert!(ClassificationResult::from_probabilities(nan).is_err());
        let unnormalized = vec![1.0; CLASS_COUNT];
        assert!(ClassificationResult::from_probabilities(unnormalized).is_err());
    }

    #[test]
    fn probability_lookup_by_label() {
        let result = ClassificationResult::from_probabilities(peaked(61, 0.9)).unwrap();
        assert!((result.probability_of('z').unwrap() - 0.9).abs() < 1e-12);
        assert_eq!(result.probability_of('#'), None);
    }

    #[test]
    fn softmax_is_stable_for_large_logits() {
        let probs = softmax(&[1000.0, 1000.0, -1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!(probs[2] < 1e-300);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
