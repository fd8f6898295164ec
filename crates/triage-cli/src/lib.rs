//! Triage CLI Library
//!
//! This crate provides the command-line interface for the diabetes
//! progression triage service, including:
//!
//! - **Train**: Fit the regression pipeline and write its artifact set
//! - **Serve**: Answer prediction requests over HTTP
//!
//! # Example
//!
//! ```bash
//! # Train a model
//! triage train --output-dir artifacts --seed 42 --model linear
//!
//! # Serve it
//! triage serve --model-dir artifacts --port 8000
//! ```

pub mod commands;

use clap::{Parser, Subcommand};

pub use commands::{ModelKindArg, ServeCommand, TrainCommand};

/// Triage - a trained regression model behind an HTTP API
///
/// Provides tools for training the diabetes-progression pipeline and
/// serving its predictions.
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the model and write artifacts
    #[command(disable_version_flag = true)]
    Train(TrainCommand),

    /// Serve predictions over HTTP
    Serve(ServeCommand),
}

/// Result type alias for CLI operations
pub type CliResult<T> = anyhow::Result<T>;
