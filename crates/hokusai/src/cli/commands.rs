//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hokusai - turn a one-line prompt into a composed comic page
#[derive(Parser, Debug)]
#[command(name = "hokusai")]
#[command(about = "Turn a one-line prompt into a composed comic page", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Interface to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate one comic and print where it was saved
    Generate {
        /// Story prompt
        #[arg(short, long)]
        prompt: String,

        /// Visual style (manga, comic, noir, watercolor, ...)
        #[arg(long, default_value = "manga")]
        style: String,

        /// Output quality (draft, standard, high)
        #[arg(long, default_value = "standard")]
        quality: String,

        /// Print the full JSON response instead of the artifact reference
        #[arg(long)]
        json: bool,
    },
}
