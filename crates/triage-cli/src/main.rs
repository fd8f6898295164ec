//! Triage CLI - Command-line interface for training and serving the model.
//!
//! This binary fronts the two halves of the service: the deterministic
//! trainer that writes the artifact directory, and the HTTP server that
//! scores feature records against it.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use triage_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber with environment filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Dispatch to appropriate subcommand
    match cli.command {
        Commands::Train(cmd) => cmd.run().await?,
        Commands::Serve(cmd) => cmd.run().await?,
    }

    Ok(())
}
