//! gRPC service implementation.
//!
//! This is the request boundary: every per-request error is turned into a
//! [`Status`] here and never escapes to the serving loop. Upload problems
//! become `INVALID_ARGUMENT`; pipeline contract violations become a generic
//! `INTERNAL`, with the detail logged server-side only.

use std::sync::Arc;

use image::ImageFormat;
use tonic::{Request, Response, Status};
use tracing::{debug, error};

use crate::content::ContentTable;
use crate::error::{PrasatError, Result};
use crate::recognizer::TempleRecognizer;
use crate::types::Classification;

use super::config::LimitsConfig;
use super::proto;
use super::proto::prasat_server::{Prasat, PrasatServer};

/// MIME types accepted for uploads.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// gRPC service wrapping a [`TempleRecognizer`] and its content table.
#[derive(Clone)]
pub struct PrasatService {
    recognizer: Arc<TempleRecognizer>,
    content: Arc<ContentTable>,
}

impl PrasatService {
    /// Create a new service.
    pub fn new(recognizer: Arc<TempleRecognizer>, content: Arc<ContentTable>) -> Self {
        Self {
            recognizer,
            content,
        }
    }

    /// Wrap in a tonic server with the upload size limit applied.
    pub fn into_server(self, limits: &LimitsConfig) -> PrasatServer<Self> {
        PrasatServer::new(self).max_decoding_message_size(limits.max_image_bytes)
    }
}

/// Classify `image` and attach the content block for the predicted label.
pub fn classify_upload(
    recognizer: &TempleRecognizer,
    content: &ContentTable,
    image: &[u8],
    content_type: &str,
) -> Result<Classification> {
    check_upload(image, content_type)?;
    let prediction = recognizer.classify(image)?;
    let content = content.lookup(&prediction.predicted_label).cloned();
    Ok(Classification {
        prediction,
        content,
    })
}

/// Reject empty uploads and anything that is not a JPEG or PNG.
///
/// The declared content type is checked when present, and the bytes are
/// always sniffed so a mislabelled upload cannot reach another decoder.
/// Unrecognizable bytes are left for the decoder to reject.
pub fn check_upload(image: &[u8], content_type: &str) -> Result<()> {
    if image.is_empty() {
        return Err(PrasatError::InvalidInput("no image uploaded".to_string()));
    }
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !mime.is_empty() && !ACCEPTED_CONTENT_TYPES.contains(&mime.as_str()) {
        return Err(PrasatError::UnsupportedFormat(format!(
            "content type '{mime}' is not accepted; use JPEG or PNG"
        )));
    }
    match image::guess_format(image) {
        Ok(ImageFormat::Jpeg | ImageFormat::Png) | Err(_) => Ok(()),
        Ok(other) => Err(PrasatError::UnsupportedFormat(format!(
            "{other:?} uploads are not accepted; use JPEG or PNG"
        ))),
    }
}

/// Convert [`PrasatError`] to [`tonic::Status`].
fn to_status(err: PrasatError) -> Status {
    if err.is_user_error() {
        Status::invalid_argument(format!("invalid image: {err}"))
    } else {
        error!(error = %err, kind = err.kind(), "internal fault while classifying");
        Status::internal("internal error while classifying image")
    }
}

#[tonic::async_trait]
impl Prasat for PrasatService {
    async fn health(
        &self,
        _request: Request<proto::HealthRequest>,
    ) -> std::result::Result<Response<proto::HealthResponse>, Status> {
        Ok(Response::new(proto::HealthResponse {
            healthy: true,
            version: crate::version_string(),
            model: self.recognizer.model().name().to_string(),
        }))
    }

    async fn labels(
        &self,
        _request: Request<proto::LabelsRequest>,
    ) -> std::result::Result<Response<proto::LabelsResponse>, Status> {
        Ok(Response::new(proto::LabelsResponse {
            labels: self.recognizer.labels().to_vec(),
        }))
    }

    async fn classify(
        &self,
        request: Request<proto::ClassifyRequest>,
    ) -> std::result::Result<Response<proto::ClassifyResponse>, Status> {
        let proto::ClassifyRequest {
            image,
            content_type,
        } = request.into_inner();
        debug!(bytes = image.len(), content_type = %content_type, "classify request");

        let recognizer = Arc::clone(&self.recognizer);
        let content = Arc::clone(&self.content);

        // Inference is CPU-bound; keep it off the async workers.
        let classification = tokio::task::spawn_blocking(move || {
            classify_upload(&recognizer, &content, &image, &content_type)
        })
        .await
        .map_err(|e| {
            error!(error = %e, "classification task failed");
            Status::internal("internal error while classifying image")
        })?
        .map_err(to_status)?;

        Ok(Response::new(classification.into()))
    }
}
