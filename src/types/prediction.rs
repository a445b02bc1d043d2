//! Classification result types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::TempleContent;

/// Confidence for a single class, as a percentage (probability × 100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    pub label: String,
    pub percentage: f32,
}

impl Confidence {
    pub fn new(label: impl Into<String>, percentage: f32) -> Self {
        Self {
            label: label.into(),
            percentage,
        }
    }
}

impl fmt::Display for Confidence {
    /// `<label>: <percentage>%` with two decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}%", self.label, self.percentage)
    }
}

/// Outcome of classifying one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Label at the index of the highest probability.
    pub predicted_label: String,
    /// Index of `predicted_label` in the label list.
    pub predicted_index: usize,
    /// One entry per label, in label order.
    pub confidences: Vec<Confidence>,
}

impl PredictionResult {
    /// Confidence of the predicted label.
    pub fn top_confidence(&self) -> Option<&Confidence> {
        self.confidences.get(self.predicted_index)
    }

    /// Confidence lines formatted for display.
    pub fn confidence_lines(&self) -> Vec<String> {
        self.confidences.iter().map(ToString::to_string).collect()
    }
}

/// A prediction together with the display content of the predicted temple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub prediction: PredictionResult,
    pub content: Option<TempleContent>,
}
