//! CLI Command Implementations
//!
//! This module contains the implementations for all CLI subcommands:
//!
//! - [`train`]: One-shot deterministic model training
//! - [`serve`]: HTTP prediction serving

mod serve;
mod train;

pub use serve::ServeCommand;
pub use train::{ModelKindArg, TrainCommand};
