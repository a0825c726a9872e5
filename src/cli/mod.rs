//! CLI module
//!
//! Command-line interface for running adapters.
//!
//! # Commands
//!
//! - `run` - Run an adapter once
//! - `list` - List built-in adapters
//! - `describe` - Show an adapter's parameters and fields
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve, ServerOptions};
