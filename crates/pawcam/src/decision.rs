use crate::PipelineError;
use serde::Serialize;
use std::fmt;

/// Default minimum confidence, exclusive, for naming a class.
pub const DEFAULT_THRESHOLD: f32 = 0.9;

/// Class index of "cat" in the model output.
pub const CAT: usize = 0;
/// Class index of "dog" in the model output.
pub const DOG: usize = 1;

/// Outcome of one classification request.
///
/// Serializes as `{"label":"cat","confidence":0.99}` or `{"label":"unknown"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "label", rename_all = "lowercase")]
pub enum ClassificationResult {
    Cat { confidence: f32 },
    Dog { confidence: f32 },
    Unknown,
}

impl ClassificationResult {
    pub fn label(&self) -> &'static str {
        match self {
            ClassificationResult::Cat { .. } => "cat",
            ClassificationResult::Dog { .. } => "dog",
            ClassificationResult::Unknown => "unknown",
        }
    }

    pub fn confidence(&self) -> Option<f32> {
        match self {
            ClassificationResult::Cat { confidence } | ClassificationResult::Dog { confidence } => {
                Some(*confidence)
            }
            ClassificationResult::Unknown => None,
        }
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationResult::Cat { confidence } => {
                write!(f, "It's a cat! ({:.1}%)", confidence * 100.0)
            }
            ClassificationResult::Dog { confidence } => {
                write!(f, "It's a dog! ({:.1}%)", confidence * 100.0)
            }
            ClassificationResult::Unknown => write!(f, "Not a cat or dog"),
        }
    }
}

/// Normalized exponentials of `scores`.
///
/// The maximum is subtracted before exponentiation so large scores do not
/// overflow. An empty slice gives an empty vector.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Maps two-class scores to a `ClassificationResult`, abstaining below the
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionEngine {
    threshold: f32,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl DecisionEngine {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Name the more probable class if either probability is strictly above
    /// the threshold, otherwise `Unknown`.
    pub fn decide(&self, probabilities: &[f32]) -> Result<ClassificationResult, PipelineError> {
        let &[cat, dog] = probabilities else {
            return Err(PipelineError::UnexpectedOutput(format!(
                "expected 2 class probabilities, got {}",
                probabilities.len()
            )));
        };

        if !(cat > self.threshold || dog > self.threshold) {
            return Ok(ClassificationResult::Unknown);
        }
        if cat >= dog {
            Ok(ClassificationResult::Cat { confidence: cat })
        } else {
            Ok(ClassificationResult::Dog { confidence: dog })
        }
    }

    /// Softmax over raw `scores`, then `decide`.
    pub fn classify(&self, scores: &[f32]) -> Result<ClassificationResult, PipelineError> {
        if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
            return Err(PipelineError::UnexpectedOutput(format!(
                "non-finite score {bad} in {scores:?}"
            )));
        }
        let probabilities = softmax(scores);
        log::debug!(
            "Scores {scores:?} -> probabilities cat={:?} dog={:?}",
            probabilities.get(CAT),
            probabilities.get(DOG)
        );
        self.decide(&probabilities)
    }
}
