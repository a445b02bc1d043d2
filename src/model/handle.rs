//! Load-once handle around the frozen classifier.
//!
//! The handle is built in an explicit startup phase and then shared read-only
//! (`Clone` is a reference-count bump) with every request handler.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::ImageClassifier;
use crate::error::{PrasatError, Result};
use crate::preprocess::DEFAULT_INPUT_SIZE;
use crate::types::{InputTensor, ProbabilityVector};

/// Model configuration (`[model]` in the config file).
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX artifact.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    /// Device to use: "cpu" or "cuda" (default: "cpu").
    #[serde(default = "default_device")]
    pub device: String,
    /// Intra-op thread count; ONNX Runtime picks when unset.
    #[serde(default)]
    pub intra_threads: Option<usize>,
    /// Set when the artifact emits raw logits instead of probabilities.
    #[serde(default)]
    pub apply_softmax: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            device: default_device(),
            intra_threads: None,
            apply_softmax: false,
        }
    }
}

/// Default model location, overridable with `PRASAT_MODEL_PATH`.
pub fn default_model_path() -> PathBuf {
    std::env::var("PRASAT_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("models").join("temple_classifier.onnx"))
}

fn default_device() -> String {
    "cpu".to_string()
}

/// Shared, immutable handle to the loaded classifier.
#[derive(Clone)]
pub struct ModelHandle {
    classifier: Arc<dyn ImageClassifier>,
    input_shape: [usize; 4],
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("model", &self.classifier.name())
            .field("input_shape", &self.input_shape)
            .finish()
    }
}

impl ModelHandle {
    /// Input shape of the temple model: one 150×150 RGB image.
    pub const DEFAULT_INPUT_SHAPE: [usize; 4] = [
        1,
        DEFAULT_INPUT_SIZE as usize,
        DEFAULT_INPUT_SIZE as usize,
        3,
    ];

    /// Load the ONNX artifact described by `config`.
    ///
    /// Any failure is a [`PrasatError::ModelLoad`]; callers at startup should
    /// treat it as fatal.
    #[cfg(feature = "onnx")]
    pub fn load(config: &ModelConfig, input_shape: [usize; 4]) -> Result<Self> {
        use crate::model::{Device, OnnxClassifier};

        let device: Device = config
            .device
            .parse()
            .map_err(|e: PrasatError| PrasatError::ModelLoad(e.to_string()))?;
        let classifier = OnnxClassifier::load(
            &config.path,
            device,
            config.intra_threads,
            config.apply_softmax,
        )?;
        tracing::info!(
            model = classifier.name(),
            path = %config.path.display(),
            device = device.name(),
            "model loaded"
        );
        Ok(Self::from_classifier(classifier, input_shape))
    }

    /// Wrap an already constructed classifier.
    pub fn from_classifier(classifier: impl ImageClassifier + 'static, input_shape: [usize; 4]) -> Self {
        Self {
            classifier: Arc::new(classifier),
            input_shape,
        }
    }

    pub fn name(&self) -> &str {
        self.classifier.name()
    }

    pub fn input_shape(&self) -> [usize; 4] {
        self.input_shape
    }

    /// Run the classifier after checking the tensor shape.
    pub fn infer(&self, tensor: &InputTensor) -> Result<ProbabilityVector> {
        if tensor.shape() != self.input_shape {
            return Err(PrasatError::ShapeMismatch {
                expected: self.input_shape.to_vec(),
                actual: tensor.shape().to_vec(),
            });
        }
        self.classifier.infer(tensor)
    }

    /// Number of classes the model emits for a blank input.
    pub fn output_width(&self) -> Result<usize> {
        let blank = InputTensor::zeros(self.input_shape);
        let probs = self
            .infer(&blank)
            .map_err(|e| PrasatError::ModelLoad(format!("blank-input inference failed: {e}")))?;
        Ok(probs.len())
    }
}
