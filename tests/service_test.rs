//! Integration tests for gRPC service mode.
//!
//! Starts an in-process prasatd server backed by a fake classifier and
//! connects with a [`ServiceClient`], validating the full round-trip through
//! proto conversions.

#![cfg(all(feature = "server", feature = "client"))]

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use image::ImageFormat;
use prasat::client::ServiceClient;
use prasat::server::PrasatService;
use prasat::server::config::LimitsConfig;
use prasat::{
    ContentTable, ImageClassifier, ModelHandle, PrasatError, Preprocessor, TempleRecognizer,
    temple_labels,
};
use tokio::net::TcpListener;
use tonic::transport::Server;

use common::{FixedClassifier, RednessClassifier, encode, jpeg, png, solid};

/// Find an available port for testing.
async fn find_available_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start a test server on a random port and return the address string.
async fn start_test_server(
    classifier: impl ImageClassifier + 'static,
    limits: LimitsConfig,
) -> String {
    let addr = find_available_port().await;
    let addr_str = format!("http://{addr}");

    let model = ModelHandle::from_classifier(classifier, ModelHandle::DEFAULT_INPUT_SHAPE);
    let recognizer = TempleRecognizer::new(Preprocessor::default(), model, temple_labels())
        .expect("failed to build test recognizer");
    let content = ContentTable::embedded().unwrap();
    let service = PrasatService::new(Arc::new(recognizer), Arc::new(content));
    let server = service.into_server(&limits);

    tokio::spawn(async move {
        Server::builder()
            .add_service(server)
            .serve(addr)
            .await
            .unwrap();
    });

    // Give the server a moment to bind.
    tokio::time::sleep(Duration::from_millis(100)).await;

    addr_str
}

async fn default_server() -> String {
    start_test_server(RednessClassifier { classes: 5 }, LimitsConfig::default()).await
}

#[tokio::test]
async fn test_client_connect() {
    let addr = default_server().await;
    let client = ServiceClient::connect(&addr).await;
    assert!(client.is_ok(), "failed to connect: {:?}", client.err());
}

#[tokio::test]
async fn test_connect_to_nothing_fails() {
    let addr = find_available_port().await;
    let err = ServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap_err();
    assert!(matches!(err, PrasatError::Rpc(_)));
}

#[tokio::test]
async fn test_health() {
    let addr = default_server().await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let health = client.health().await.unwrap();
    assert!(health.healthy);
    assert!(health.version.starts_with(prasat::PKG_VERSION));
    assert_eq!(health.model, "redness");
}

#[tokio::test]
async fn test_labels_in_model_order() {
    let addr = default_server().await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    assert_eq!(client.labels().await.unwrap(), temple_labels());
}

#[tokio::test]
async fn test_classify_round_trip() {
    let addr = start_test_server(
        FixedClassifier(vec![0.05, 0.05, 0.05, 0.05, 0.8]),
        LimitsConfig::default(),
    )
    .await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let classification = client
        .classify(jpeg(320, 200, [80, 70, 60]), "image/jpeg")
        .await
        .unwrap();

    let prediction = &classification.prediction;
    assert_eq!(prediction.predicted_label, "Preah_Vihear");
    assert_eq!(prediction.predicted_index, 4);
    assert_eq!(prediction.confidences.len(), 5);
    assert!((prediction.confidences[4].percentage - 80.0).abs() < 1e-3);

    let content = classification.content.expect("content for predicted label");
    assert_eq!(content.label, "Preah_Vihear");
    assert_eq!(content.source_url, "https://whc.unesco.org/en/list/1224/");
    assert!(!content.khmer.body.is_empty());
    assert!(!content.english.body.is_empty());
}

#[tokio::test]
async fn test_classify_sniffs_missing_content_type() {
    let addr = default_server().await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let classification = client
        .classify(png(30, 30, [255, 0, 0]), "")
        .await
        .unwrap();
    assert_eq!(classification.prediction.predicted_label, "Preah_Vihear");
}

#[tokio::test]
async fn test_invalid_image_is_reported_and_server_keeps_serving() {
    let addr = default_server().await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let err = client
        .classify(b"this is not a jpeg".to_vec(), "image/jpeg")
        .await
        .unwrap_err();
    assert!(
        matches!(err, PrasatError::InvalidInput(ref msg) if msg.starts_with("invalid image")),
        "got {err:?}"
    );

    let ok = client.classify(png(8, 8, [0, 0, 0]), "image/png").await;
    assert!(ok.is_ok(), "server should survive a bad upload: {ok:?}");
}

#[tokio::test]
async fn test_empty_and_unsupported_uploads() {
    let addr = default_server().await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let err = client.classify(Vec::new(), "image/png").await.unwrap_err();
    assert!(matches!(err, PrasatError::InvalidInput(_)), "got {err:?}");

    let err = client
        .classify(png(8, 8, [0, 0, 0]), "image/gif")
        .await
        .unwrap_err();
    assert!(matches!(err, PrasatError::InvalidInput(ref msg) if msg.contains("gif")));
}

#[tokio::test]
async fn test_mislabelled_upload_is_rejected() {
    let addr = default_server().await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let gif = encode(&solid(8, 8, [0, 0, 0]), ImageFormat::Gif);
    let err = client.classify(gif, "image/png").await.unwrap_err();
    assert!(
        matches!(err, PrasatError::InvalidInput(ref msg) if msg.contains("Gif")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let limits = LimitsConfig {
        max_image_bytes: 1024,
        ..LimitsConfig::default()
    };
    let addr = start_test_server(RednessClassifier { classes: 5 }, limits).await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let big = vec![0u8; 64 * 1024];
    let err = client.classify(big, "image/png").await.unwrap_err();
    assert!(matches!(err, PrasatError::Rpc(_)), "got {err:?}");
}

#[tokio::test]
async fn test_concurrent_requests() {
    let addr = default_server().await;
    let client = ServiceClient::connect(&addr).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8u8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .classify(png(32, 32, [i * 30, 0, 0]), "image/png")
                .await
        }));
    }
    for handle in handles {
        let classification = handle.await.unwrap().unwrap();
        assert_eq!(classification.prediction.confidences.len(), 5);
    }
}
