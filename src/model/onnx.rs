//! Local image classification via ONNX Runtime.
//!
//! Expects a single-input, single-output graph: an NHWC `f32` image batch in,
//! a `[batch, classes]` score matrix out.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use tracing::debug;

use crate::ImageClassifier;
use crate::error::{PrasatError, Result};
use crate::model::Device;
use crate::types::{InputTensor, ProbabilityVector};

/// Image classifier backed by an ONNX Runtime session.
pub struct OnnxClassifier {
    // `Session::run` needs exclusive access.
    session: Mutex<Session>,
    name: String,
    apply_softmax: bool,
}

impl OnnxClassifier {
    /// Load the model at `model_path` onto `device`.
    pub fn load(
        model_path: &Path,
        device: Device,
        intra_threads: Option<usize>,
        apply_softmax: bool,
    ) -> Result<Self> {
        if !model_path.exists() {
            return Err(PrasatError::ModelLoad(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }
        let session = build_session(model_path, &device, intra_threads)?;
        debug!(path = %model_path.display(), device = device.name(), "ONNX session ready");

        Ok(Self {
            session: Mutex::new(session),
            name: model_name(model_path),
            apply_softmax,
        })
    }
}

impl ImageClassifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn infer(&self, tensor: &InputTensor) -> Result<ProbabilityVector> {
        let shape = tensor.shape();
        let input = TensorRef::from_array_view((shape, tensor.as_slice())).map_err(|e| {
            PrasatError::Inference(format!("Failed to create input tensor: {}", e))
        })?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| PrasatError::Inference(format!("Failed to acquire session lock: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| PrasatError::Inference(format!("ONNX inference failed: {}", e)))?;

        // try_extract_tensor returns (&Shape, &[T])
        let (output_shape, scores) = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            PrasatError::Inference(format!("Failed to extract scores: {}", e))
        })?;

        // Only the first row: the batch always holds a single image.
        let num_classes = match output_shape.len() {
            1 => output_shape[0] as usize,
            2 => output_shape[1] as usize,
            _ => {
                return Err(PrasatError::Inference(format!(
                    "Expected [batch, classes] output, got shape {:?}",
                    output_shape.to_vec()
                )));
            }
        };
        let row = scores.get(..num_classes).ok_or_else(|| {
            PrasatError::Inference("Model returned fewer scores than its shape".to_string())
        })?;

        Ok(if self.apply_softmax {
            ProbabilityVector::from_logits(row)
        } else {
            ProbabilityVector::new(row.to_vec())
        })
    }
}

/// Build an ONNX session with the appropriate execution provider.
fn build_session(model_path: &Path, device: &Device, intra_threads: Option<usize>) -> Result<Session> {
    let mut builder = Session::builder()
        .map_err(|e| PrasatError::ModelLoad(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| PrasatError::ModelLoad(format!("Failed to set optimization level: {}", e)))?;

    if let Some(threads) = intra_threads {
        builder = builder
            .with_intra_threads(threads)
            .map_err(|e| PrasatError::ModelLoad(format!("Failed to set intra threads: {}", e)))?;
    }

    // Configure execution provider based on device
    let builder = match device {
        Device::Cpu => builder,
        #[cfg(feature = "cuda")]
        Device::Cuda { device_id } => {
            use ort::execution_providers::CUDAExecutionProvider;
            builder
                .with_execution_providers([
                    CUDAExecutionProvider::default()
                        .with_device_id(*device_id as i32)
                        .build(),
                ])
                .map_err(|e| PrasatError::ModelLoad(format!("Failed to configure CUDA: {}", e)))?
        }
    };

    builder
        .commit_from_file(model_path)
        .map_err(|e| PrasatError::ModelLoad(format!("Failed to load ONNX model: {}", e)))
}

fn model_name(model_path: &Path) -> String {
    model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("onnx-model")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_is_a_load_error() {
        let result = OnnxClassifier::load(
            Path::new("/nonexistent/temple_classifier.onnx"),
            Device::Cpu,
            None,
            false,
        );
        match result {
            Err(PrasatError::ModelLoad(msg)) => assert!(msg.contains("not found")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected a load error"),
        }
    }

    #[test]
    fn corrupt_model_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.onnx");
        std::fs::write(&path, b"definitely not protobuf").unwrap();

        let result = OnnxClassifier::load(&path, Device::Cpu, None, false);
        assert!(matches!(result, Err(PrasatError::ModelLoad(_))));
    }

    #[test]
    fn model_name_is_file_stem() {
        assert_eq!(model_name(Path::new("/models/vgg16_temples.onnx")), "vgg16_temples");
    }
}
