//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pipedrive extraction adapters
#[derive(Parser, Debug)]
#[command(name = "pipedrive-extract")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an adapter once and write its output to stdout
    Run {
        /// Adapter name (see `list`)
        adapter: String,

        /// Positional input as a JSON array, or `-` to read it from stdin
        #[arg(short, long, default_value = "[]")]
        input: String,

        /// Inline config JSON
        #[arg(long, env = "PIPEDRIVE_CONFIG_JSON", hide_env_values = true)]
        config_json: Option<String>,
    },

    /// List built-in adapters
    List,

    /// Show an adapter's parameters and returned fields
    Describe {
        /// Adapter name
        adapter: String,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "PORT")]
        port: u16,

        /// Let requests without credentials use this process's environment credentials
        #[arg(long)]
        env_credentials: bool,
    },
}
