//! CLI runner - executes commands

use crate::adapters::{lookup, ADAPTERS};
use crate::cli::commands::{Cli, Commands};
use crate::cli::server::ServerOptions;
use crate::config::InvocationVars;
use crate::engine::AdapterRunner;
use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::io::{self, Read, Write};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                adapter,
                input,
                config_json,
            } => self.run_adapter(adapter, input, config_json.as_deref()).await,
            Commands::List => self.list_adapters(),
            Commands::Describe { adapter } => self.describe(adapter),
            Commands::Serve {
                port,
                env_credentials,
            } => {
                let options = ServerOptions {
                    env_credentials: *env_credentials,
                };
                crate::cli::serve(*port, options).await
            }
        }
    }

    /// Load invocation variables, then fill gaps from the environment
    fn load_vars(&self, inline: Option<&str>) -> Result<InvocationVars> {
        // Inline config takes precedence
        let vars = if let Some(json_str) = inline {
            InvocationVars::from_json_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
        } else if let Some(path) = &self.cli.config {
            InvocationVars::from_file(path)?
        } else {
            InvocationVars::default()
        };

        Ok(vars.with_env_fallback())
    }

    /// Read the positional input argument
    fn load_input(input: &str) -> Result<Value> {
        let text = if input == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            input.to_string()
        };

        if text.trim().is_empty() {
            return Ok(json!([]));
        }
        serde_json::from_str(&text)
            .map_err(|e| Error::invalid_input(format!("input is not valid JSON: {e}")))
    }

    /// Run one adapter against stdout
    async fn run_adapter(&self, name: &str, input: &str, config_json: Option<&str>) -> Result<()> {
        let adapter = lookup(name)?;
        let vars = self.load_vars(config_json)?;
        let input = Self::load_input(input)?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        AdapterRunner::new(adapter).run(&vars, &input, &mut out).await?;
        out.flush()?;
        Ok(())
    }

    /// List built-in adapters
    fn list_adapters(&self) -> Result<()> {
        let adapters: Vec<Value> = ADAPTERS
            .iter()
            .map(|a| {
                json!({
                    "name": a.name,
                    "title": a.title,
                    "description": a.description,
                    "output": a.output_format(),
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "ADAPTERS",
            "adapters": adapters
        }))
    }

    /// Describe one adapter
    fn describe(&self, name: &str) -> Result<()> {
        let adapter = lookup(name)?;
        self.output_message(&json!({
            "type": "ADAPTER",
            "adapter": adapter.describe()
        }))
    }

    /// Print a JSON message to stdout
    fn output_message(&self, msg: &Value) -> Result<()> {
        let text = if self.cli.verbose {
            serde_json::to_string_pretty(msg)?
        } else {
            serde_json::to_string(msg)?
        };
        println!("{text}");
        Ok(())
    }
}
