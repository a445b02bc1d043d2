//! Prasat - Cambodian historical temple recognition
//!
//! Classifies a photograph into one of five temple categories with a frozen
//! convolutional network, and pairs the prediction with bilingual
//! (Khmer / English) background text for the winning temple.
//!
//! The pipeline is:
//!
//! 1. [`Preprocessor`] decodes the upload and fits it to a `1×150×150×3`
//!    tensor scaled to `[0, 1]`.
//! 2. [`ModelHandle`] runs the classifier, loaded once at startup.
//! 3. [`decide`] picks the label at the argmax and builds the per-class
//!    percentage breakdown.
//!
//! [`TempleRecognizer`] ties the three together.
//!
//! # Example
//!
//! ```rust,no_run
//! use prasat::{ModelConfig, ModelHandle, Preprocessor, TempleRecognizer, temple_labels};
//!
//! fn main() -> prasat::Result<()> {
//!     let model = ModelHandle::load(&ModelConfig::default(), ModelHandle::DEFAULT_INPUT_SHAPE)?;
//!     let recognizer = TempleRecognizer::new(Preprocessor::default(), model, temple_labels())?;
//!
//!     let bytes = std::fs::read("bayon.jpg").expect("readable image");
//!     let prediction = recognizer.classify(&bytes)?;
//!     println!("Detected Temple: {}", prediction.predicted_label);
//!     for line in prediction.confidence_lines() {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub mod client;
pub mod content;
pub mod decision;
pub mod error;
pub mod labels;
pub mod model;
pub mod preprocess;
pub mod recognizer;
pub mod render;
#[cfg(any(feature = "server", feature = "client"))]
pub mod server;
pub mod telemetry;
pub mod traits;
pub mod types;
mod version;

// Re-export main types at crate root
pub use content::{ContentBlock, ContentTable, TempleContent};
pub use decision::decide;
pub use error::{PrasatError, Result};
pub use labels::{TEMPLE_LABELS, temple_labels};
pub use model::{Device, ModelConfig, ModelHandle};
pub use preprocess::{FitPolicy, PreprocessConfig, Preprocessor};
pub use recognizer::TempleRecognizer;
pub use traits::ImageClassifier;
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};

#[cfg(feature = "onnx")]
pub use model::OnnxClassifier;

// Re-export all types
pub use types::{Classification, Confidence, InputTensor, PredictionResult, ProbabilityVector};
