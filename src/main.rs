//! Greeter: service entry point.
//!
//! Parses the command line, loads an optional dotenv file, resolves the
//! configuration, initializes tracing, builds the Axum router and serves it
//! until SIGTERM/SIGINT.

use std::path::PathBuf;

use clap::Parser;

use greeter::config::{load_dotenv, AppConfig, DEFAULT_DOTENV_PATH};
use greeter::http::start_server;
use greeter::{create_router, logging, AppState};

/// Greeter: a greeting service guarded by a static API key
#[derive(Parser, Debug)]
#[command(name = "greeter", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "greeter=debug")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Path to .env file, loaded if it exists
    #[arg(long, env = "DOTENV_PATH", default_value = DEFAULT_DOTENV_PATH)]
    dotenv: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load .env before anything reads the environment
    let dotenv_loaded = load_dotenv(&args.dotenv)?;

    let config = AppConfig::load(args.config.as_deref())?;

    let log_filter = logging::log_filter(args.log_level, std::env::var("RUST_LOG").ok());
    logging::init(config.logging.format, &log_filter);

    if dotenv_loaded {
        tracing::info!(path = %args.dotenv.display(), "Loaded environment file");
    }
    tracing::info!(
        environment = %config.environment,
        aws_region = %config.aws_region,
        host = %config.http.host,
        port = config.http.port,
        "Loaded configuration"
    );

    let http = config.http.clone();
    let state = AppState::new(config);
    let app = create_router(state);

    start_server(app, &http).await?;

    Ok(())
}
