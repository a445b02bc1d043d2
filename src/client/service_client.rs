//! [`ServiceClient`] — connects to prasatd over gRPC.
//!
//! All proto ↔ native type conversions are centralized in [`crate::server::convert`].

use image::ImageFormat;
use tonic::transport::Channel;

use crate::server::proto;
use crate::server::proto::prasat_client::PrasatClient;
use crate::types::Classification;
use crate::{PrasatError, Result};

/// Health information reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHealth {
    pub healthy: bool,
    pub version: String,
    pub model: String,
}

/// A client for a remote prasatd server.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    inner: PrasatClient<Channel>,
}

impl ServiceClient {
    /// Connect to a prasatd server at the given address.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = ServiceClient::connect("http://127.0.0.1:9742").await?;
    /// ```
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        let inner = PrasatClient::connect(addr.clone())
            .await
            .map_err(|e| PrasatError::Rpc(format!("failed to connect to {addr}: {e}")))?;
        Ok(Self { inner })
    }

    /// Raise the outgoing message limit for large uploads.
    pub fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.inner = self.inner.max_encoding_message_size(limit);
        self
    }

    pub async fn health(&self) -> Result<ServerHealth> {
        let response = self
            .inner
            .clone()
            .health(proto::HealthRequest {})
            .await
            .map_err(from_status)?
            .into_inner();
        Ok(ServerHealth {
            healthy: response.healthy,
            version: response.version,
            model: response.model,
        })
    }

    /// Class labels in model output order.
    pub async fn labels(&self) -> Result<Vec<String>> {
        let response = self
            .inner
            .clone()
            .labels(proto::LabelsRequest {})
            .await
            .map_err(from_status)?;
        Ok(response.into_inner().labels)
    }

    /// Upload an encoded image for classification.
    pub async fn classify(&self, image: Vec<u8>, content_type: &str) -> Result<Classification> {
        let request = proto::ClassifyRequest {
            image,
            content_type: content_type.to_string(),
        };
        let response = self
            .inner
            .clone()
            .classify(request)
            .await
            .map_err(from_status)?;
        Ok(response.into_inner().into())
    }
}

/// Convert [`tonic::Status`] to [`PrasatError`].
fn from_status(status: tonic::Status) -> PrasatError {
    match status.code() {
        tonic::Code::InvalidArgument => PrasatError::InvalidInput(status.message().to_string()),
        _ => PrasatError::Rpc(status.message().to_string()),
    }
}

/// MIME type for a file path, judged by its extension. Empty when the
/// server should sniff the bytes instead.
pub fn content_type_for_path(path: &std::path::Path) -> &'static str {
    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Png) => "image/png",
        _ => "",
    }
}
