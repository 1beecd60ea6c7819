//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// layerpace - send requests through the adaptive throttling transport
#[derive(Parser, Debug)]
#[command(name = "layerpace")]
#[command(about = "Send requests through the adaptive two-tier throttling transport", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load throttle configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a request one or more times through the throttled transport
    Send {
        /// Full request URL, e.g. https://yourdomain.commercelayer.io/api/skus
        #[arg(long)]
        url: String,

        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Number of sequential sends
        #[arg(long, default_value = "1")]
        count: u32,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the effective throttle configuration as JSON
    Config,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// One JSON object per line
    Json,
}
