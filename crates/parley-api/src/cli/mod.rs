//! CLI command definitions for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Minimal chat gateway for hosted LLM providers.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "parley.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP gateway.
    Serve {
        /// Override the configured bind address.
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Chat with the assistant in the terminal.
    Chat {
        /// Override the configured model identifier.
        #[arg(long)]
        model: Option<String>,

        /// Override the configured system instruction.
        #[arg(long)]
        system: Option<String>,
    },
}
