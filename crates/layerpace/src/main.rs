//! layerpace CLI binary.
//!
//! Sends requests through the throttled transport and reports what the
//! throttle learned about the server's rate limits.

use clap::Parser;
use layerpace::ThrottleConfig;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, send_requests};

    // Load .env before reading LAYERPACE_* variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose picks the default level
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => ThrottleConfig::from_file(path)?,
        None => ThrottleConfig::load()?,
    };

    match cli.command {
        Commands::Send {
            url,
            method,
            count,
            format,
        } => {
            let token = std::env::var("LAYERPACE_TOKEN").ok();
            send_requests(&url, &method, count, format, config, token).await?;
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
