//! prasat — temple recognition CLI client
//!
//! Uploads photographs to prasatd and prints the result page.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prasat::client::{ServiceClient, content_type_for_path};
use prasat::render::{render_classification, render_prompt};
use prasat::ContentTable;

/// Prasat CLI client
#[derive(Parser)]
#[command(name = "prasat")]
#[command(version = prasat::PKG_VERSION)]
#[command(about = "Cambodian temple recognition client")]
struct Args {
    /// Server address
    #[arg(
        short,
        long,
        env = "PRASAT_ADDRESS",
        default_value = "http://127.0.0.1:9742"
    )]
    address: String,

    /// Largest upload to send, in bytes
    #[arg(long, default_value_t = 16 * 1024 * 1024)]
    max_upload_bytes: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check service health
    Health,

    /// List the temple labels the model predicts
    Labels,

    /// Classify a photograph (or omit to read from stdin)
    Classify {
        /// JPEG or PNG file
        file: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    // Nothing to upload: show the prompt without contacting the server.
    let upload = match &args.command {
        Command::Classify { file, .. } => match read_upload(file.as_ref())? {
            Some(upload) => Some(upload),
            None => {
                print!("{}", render_prompt(&ContentTable::embedded()?));
                return Ok(());
            }
        },
        _ => None,
    };

    let client = ServiceClient::connect(&args.address)
        .await?
        .max_upload_bytes(args.max_upload_bytes);

    match args.command {
        Command::Health => {
            let health = client.health().await?;
            let status = if health.healthy { "healthy" } else { "unhealthy" };
            println!("prasatd {}", health.version);
            println!("status: {status}");
            println!("model: {}", health.model);
        }

        Command::Labels => {
            for (index, label) in client.labels().await?.iter().enumerate() {
                println!("{index}: {label}");
            }
        }

        Command::Classify { json, .. } => {
            let Some((bytes, content_type)) = upload else {
                return Ok(());
            };
            let classification = client.classify(bytes, content_type).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&classification)?);
            } else {
                print!("{}", render_classification(&classification));
            }
        }
    }

    Ok(())
}

/// Read the image from `file`, or from stdin when it is piped.
///
/// Returns `None` when there is nothing to upload. Stdin uploads carry no
/// content type, so the server sniffs the bytes.
fn read_upload(
    file: Option<&PathBuf>,
) -> Result<Option<(Vec<u8>, &'static str)>, Box<dyn std::error::Error>> {
    if let Some(path) = file {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        return Ok(Some((bytes, content_type_for_path(path))));
    }

    if io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    if buf.is_empty() {
        Ok(None)
    } else {
        Ok(Some((buf, "")))
    }
}
