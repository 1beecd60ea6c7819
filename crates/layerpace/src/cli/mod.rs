//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the layerpace binary.

mod commands;
mod send;

pub use commands::{Cli, Commands, OutputFormat};
pub use send::send_requests;
