//! The per-request pipeline: bytes → tensor → probabilities → prediction.

use std::time::Instant;

use tracing::{debug, warn};

use crate::decision::decide;
use crate::error::{PrasatError, Result};
use crate::model::ModelHandle;
use crate::preprocess::Preprocessor;
use crate::telemetry;
use crate::types::PredictionResult;

/// Preprocessor, model and label order, checked against each other once at
/// construction and then shared read-only.
#[derive(Debug, Clone)]
pub struct TempleRecognizer {
    preprocessor: Preprocessor,
    model: ModelHandle,
    labels: Vec<String>,
}

impl TempleRecognizer {
    /// Assemble the pipeline.
    ///
    /// Fails with [`PrasatError::ModelLoad`] when the preprocessor output does
    /// not fit the model input, or when the model's output width differs from
    /// the number of labels.
    pub fn new(preprocessor: Preprocessor, model: ModelHandle, labels: Vec<String>) -> Result<Self> {
        if preprocessor.output_shape() != model.input_shape() {
            return Err(PrasatError::ModelLoad(format!(
                "preprocessor produces {:?} but model expects {:?}",
                preprocessor.output_shape(),
                model.input_shape()
            )));
        }
        let width = model.output_width()?;
        if width != labels.len() {
            return Err(PrasatError::ModelLoad(format!(
                "model emits {width} classes but {} labels are configured",
                labels.len()
            )));
        }
        debug!(model = model.name(), classes = width, "recognizer ready");
        Ok(Self {
            preprocessor,
            model,
            labels,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Classify one encoded image.
    pub fn classify(&self, image: &[u8]) -> Result<PredictionResult> {
        let start = Instant::now();
        let result = self.run(image);
        record_classification(start, &result);

        match &result {
            Ok(prediction) => debug!(
                label = %prediction.predicted_label,
                confidence = prediction.top_confidence().map(|c| c.percentage),
                bytes = image.len(),
                "classified image"
            ),
            Err(e) if e.is_user_error() => debug!(error = %e, "rejected upload"),
            Err(e) => warn!(error = %e, "classification failed"),
        }
        result
    }

    fn run(&self, image: &[u8]) -> Result<PredictionResult> {
        let tensor = self.preprocessor.prepare(image)?;

        let inference_start = Instant::now();
        let probs = self.model.infer(&tensor)?;
        metrics::histogram!(telemetry::INFERENCE_DURATION_SECONDS)
            .record(inference_start.elapsed().as_secs_f64());

        decide(&probs, &self.labels)
    }
}

/// Record request outcome metrics (counter + histogram).
fn record_classification(start: Instant, result: &Result<PredictionResult>) {
    let (status, error) = match result {
        Ok(_) => ("ok", "none"),
        Err(e) => ("error", e.kind()),
    };
    metrics::counter!(telemetry::CLASSIFICATIONS_TOTAL,
        "status" => status,
        "error" => error,
    )
    .increment(1);
    metrics::histogram!(telemetry::CLASSIFICATION_DURATION_SECONDS)
        .record(start.elapsed().as_secs_f64());

    if let Ok(prediction) = result {
        metrics::counter!(telemetry::PREDICTIONS_TOTAL,
            "label" => prediction.predicted_label.clone(),
        )
        .increment(1);
    }
}
