//! prasatd — temple recognition daemon.
//!
//! Loads the classifier once at startup and serves classifications over
//! gRPC. A model that cannot be loaded, or whose output width does not
//! match the label table, stops the daemon before it binds.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tonic::transport::Server;
use tracing::info;

use prasat::server::PrasatService;
use prasat::server::config::Config;
use prasat::{
    ModelHandle, PrasatError, Preprocessor, TEMPLE_LABELS, TempleRecognizer, temple_labels,
};

/// Prasat daemon — Cambodian temple recognition service.
#[derive(Parser)]
#[command(name = "prasatd")]
#[command(version = prasat::PKG_VERSION)]
#[command(about = "Cambodian temple recognition daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref())?;

    let content = config.content.load_table()?;
    content.validate(&TEMPLE_LABELS)?;

    let recognizer = build_recognizer(&config)?;

    // Parse address
    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| PrasatError::Configuration(format!("Invalid address: {e}")))?;

    info!(
        version = prasat::version_string(),
        %addr,
        model = recognizer.model().name(),
        "prasatd starting"
    );

    let limits = &config.server.limits;
    let service = PrasatService::new(Arc::new(recognizer), Arc::new(content));

    Server::builder()
        .timeout(Duration::from_secs(limits.request_timeout_secs))
        .concurrency_limit_per_connection(limits.max_concurrent_requests)
        .add_service(service.into_server(limits))
        .serve(addr)
        .await?;

    Ok(())
}

/// Load the model and check it against the preprocessing and label setup.
fn build_recognizer(config: &Config) -> Result<TempleRecognizer, PrasatError> {
    let preprocessor = Preprocessor::new(config.preprocess.clone())?;
    let model = ModelHandle::load(&config.model, preprocessor.output_shape())?;
    TempleRecognizer::new(preprocessor, model, temple_labels())
}
