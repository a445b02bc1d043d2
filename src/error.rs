//! Prasat error types

/// Prasat error types
#[derive(Debug, thiserror::Error)]
pub enum PrasatError {
    // Startup errors
    /// The model artifact is missing, corrupt, or disagrees with the label table.
    /// Fatal: a process without a model cannot serve requests.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    // Per-request input errors
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Contract violations between pipeline stages
    #[error("tensor shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("length mismatch: {probabilities} probabilities for {labels} labels")]
    LengthMismatch { probabilities: usize, labels: usize },

    #[error("inference failed: {0}")]
    Inference(String),

    // Transport errors
    #[error("RPC error: {0}")]
    Rpc(String),
}

impl PrasatError {
    /// Whether the error was caused by what the user uploaded.
    ///
    /// User errors are reported back as "invalid image"; everything else is
    /// an internal fault and is surfaced generically.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PrasatError::Decode(_) | PrasatError::UnsupportedFormat(_) | PrasatError::InvalidInput(_)
        )
    }

    /// Short stable name, used as a metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            PrasatError::ModelLoad(_) => "model_load",
            PrasatError::Configuration(_) => "configuration",
            PrasatError::Decode(_) => "decode",
            PrasatError::UnsupportedFormat(_) => "unsupported_format",
            PrasatError::InvalidInput(_) => "invalid_input",
            PrasatError::ShapeMismatch { .. } => "shape_mismatch",
            PrasatError::LengthMismatch { .. } => "length_mismatch",
            PrasatError::Inference(_) => "inference",
            PrasatError::Rpc(_) => "rpc",
        }
    }
}

/// Result type alias for Prasat operations
pub type Result<T> = std::result::Result<T, PrasatError>;
