//! Probability vector → predicted label.

use crate::error::{PrasatError, Result};
use crate::types::{Confidence, PredictionResult, ProbabilityVector};

/// Pick the most probable label and build the per-class breakdown.
///
/// Ties go to the lowest index. A NaN probability counts as the maximum,
/// so the first NaN wins, as with numpy's `argmax`.
pub fn decide<L: AsRef<str>>(probs: &ProbabilityVector, labels: &[L]) -> Result<PredictionResult> {
    if probs.len() != labels.len() {
        return Err(PrasatError::LengthMismatch {
            probabilities: probs.len(),
            labels: labels.len(),
        });
    }
    let predicted_index = argmax(probs.as_slice())
        .ok_or_else(|| PrasatError::InvalidInput("empty probability vector".to_string()))?;

    let confidences = labels
        .iter()
        .zip(probs.as_slice())
        .map(|(label, p)| Confidence::new(label.as_ref(), p * 100.0))
        .collect();

    Ok(PredictionResult {
        predicted_label: labels[predicted_index].as_ref().to_string(),
        predicted_index,
        confidences,
    })
}

/// Index of the first maximum, or `None` for an empty slice.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            return Some(i);
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
