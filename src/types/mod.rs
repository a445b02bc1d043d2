//! Public types for the Prasat API.

mod prediction;
mod tensor;

pub use prediction::{Classification, Confidence, PredictionResult};
pub use tensor::{InputTensor, ProbabilityVector};
