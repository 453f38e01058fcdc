//! `go2-task`: build and inspect the custom Go2 locomotion task.
//!
//! - `register` -- Build the task from a parameter file and print the entry
//! - `params`   -- Print the default parameter set

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use locomotion_go2::{CustomEnvParams, register_custom_env};
use locomotion_registry::TaskRegistry;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build and inspect the custom Go2 locomotion task.
#[derive(Parser)]
#[command(name = "go2-task", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the task and print the registered entry as JSON.
    Register {
        /// JSON parameter file (defaults are used if not provided).
        #[arg(long)]
        params: Option<PathBuf>,

        /// Write the entry here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the default parameter set as JSON.
    Params,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Register { params, output } => register(params, output),
        Commands::Params => {
            let json = serde_json::to_string_pretty(&CustomEnvParams::default())
                .context("failed to serialize default parameters")?;
            println!("{json}");
            Ok(())
        }
    }
}

fn register(params: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let params = match params {
        Some(path) => CustomEnvParams::from_path(&path)
            .with_context(|| format!("failed to load parameters from {}", path.display()))?,
        None => CustomEnvParams::default(),
    };

    let mut registry = TaskRegistry::new();
    register_custom_env(&mut registry, &params).context("failed to build custom task")?;

    let entry = registry
        .get(&params.task)
        .with_context(|| format!("task {} missing after registration", params.task))?;
    let json = serde_json::to_string_pretty(entry).context("failed to serialize task entry")?;

    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), task = %entry.id, "Wrote task entry");
        }
        None => println!("{json}"),
    }
    Ok(())
}
