//! Veridoc daemon — entry point for running the verification service.

mod config;

use clap::Parser;
use config::ServiceConfig;
use std::path::PathBuf;
use std::sync::Arc;
use veridoc_engine::VerificationOrchestrator;
use veridoc_extraction::{ExtractionClient, HttpOcrEngine};
use veridoc_facematch::{FaceMatchClient, HttpFaceEngine};
use veridoc_rpc::RpcServer;
use veridoc_utils::{format_millis, init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "veridoc-daemon", about = "Veridoc identity verification service")]
struct Cli {
    /// Port the HTTP service listens on.
    #[arg(long, env = "VERIDOC_PORT")]
    port: Option<u16>,

    /// Recognize route of the external OCR service.
    #[arg(long, env = "VERIDOC_OCR_ENDPOINT")]
    ocr_endpoint: Option<String>,

    /// Compare route of the external face service.
    #[arg(long, env = "VERIDOC_FACE_ENDPOINT")]
    face_endpoint: Option<String>,

    /// Acceptance threshold as a 0-1 fraction.
    #[arg(long, env = "VERIDOC_THRESHOLD")]
    threshold: Option<f64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "VERIDOC_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "VERIDOC_LOG_FORMAT")]
    log_format: String,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the verification service.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config: Option<ServiceConfig> = match &cli.config {
        Some(path) => Some(ServiceConfig::from_toml_file(&path.display().to_string())?),
        None => None,
    };

    let mut config = file_config.unwrap_or_default();
    if let Some(port) = cli.port {
        config.listen_port = port;
    }
    if let Some(endpoint) = cli.ocr_endpoint {
        config.ocr_endpoint = endpoint;
    }
    if let Some(endpoint) = cli.face_endpoint {
        config.face_endpoint = endpoint;
    }
    if let Some(threshold) = cli.threshold {
        config.engine.acceptance_threshold = threshold;
    }
    config.log_level = cli.log_level;
    config.log_format = cli.log_format;

    init_logging(LogFormat::from_config(&config.log_format), &config.log_level);

    match cli.command {
        Command::Serve => serve(config).await,
    }
}

async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    tracing::info!(
        port = config.listen_port,
        threshold = config.engine.acceptance_threshold,
        extraction_timeout = %format_millis(config.engine.extraction_timeout_ms),
        request_timeout = %format_millis(config.engine.request_timeout_ms),
        "starting Veridoc service"
    );

    let extraction = ExtractionClient::new(
        Arc::new(HttpOcrEngine::new(config.ocr_endpoint.clone())),
        &config.engine,
    );
    let faces = FaceMatchClient::new(
        Arc::new(HttpFaceEngine::new(config.face_endpoint.clone())),
        &config.engine,
    );

    // Misconfigured parameters are a startup failure, not a per-request one.
    let orchestrator = VerificationOrchestrator::new(extraction, faces, config.engine.clone())?;

    let server = RpcServer::new(config.listen_port, orchestrator);

    tokio::select! {
        result = server.start() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received SIGINT, shutting down");
        }
    }

    tracing::info!("Veridoc daemon exited cleanly");
    Ok(())
}
