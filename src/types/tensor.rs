//! Numeric data flowing into and out of the classifier.

use crate::error::{PrasatError, Result};

/// Model input: a dense `f32` tensor in NHWC layout (batch, row, column, channel).
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl InputTensor {
    /// Wrap `data` with the given shape.
    ///
    /// Fails with [`PrasatError::ShapeMismatch`] if `data` does not hold
    /// exactly as many elements as the shape describes.
    pub fn new(shape: [usize; 4], data: Vec<f32>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(PrasatError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![data.len()],
            });
        }
        Ok(Self { shape, data })
    }

    /// All-zero tensor of the given shape.
    pub fn zeros(shape: [usize; 4]) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.iter().product()],
        }
    }

    /// `[batch, height, width, channels]`
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Value at `(batch, y, x, channel)`.
    pub fn get(&self, n: usize, y: usize, x: usize, c: usize) -> Option<f32> {
        let [batch, height, width, channels] = self.shape;
        if n >= batch || y >= height || x >= width || c >= channels {
            return None;
        }
        let index = ((n * height + y) * width + x) * channels + c;
        self.data.get(index).copied()
    }
}

/// Classifier output: one probability per class, in label order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityVector(Vec<f32>);

impl ProbabilityVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Normalize raw logits with a numerically stable softmax.
    pub fn from_logits(logits: &[f32]) -> Self {
        Self(softmax(logits))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for ProbabilityVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Softmax function.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|x| x / sum).collect()
}
