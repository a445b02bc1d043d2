//! Model loading and lifecycle.

pub mod device;
pub mod handle;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use device::Device;
pub use handle::{ModelConfig, ModelHandle};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
