//! Core ImageClassifier trait

use crate::Result;
use crate::types::{InputTensor, ProbabilityVector};

/// A frozen image classifier: a pure function from an input tensor to a
/// probability vector.
///
/// Implementations must be safe to share across request handlers. They are
/// wrapped in a [`ModelHandle`](crate::ModelHandle), which validates the
/// input shape before calling [`infer`](Self::infer).
pub trait ImageClassifier: Send + Sync {
    /// Human-readable model name for logs and health reports.
    fn name(&self) -> &str;

    /// Run the model on one batch.
    fn infer(&self, tensor: &InputTensor) -> Result<ProbabilityVector>;
}
