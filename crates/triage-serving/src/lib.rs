//! HTTP serving layer for the diabetes-progression scorer.
//!
//! This crate turns a trained artifact set (see `triage-model`) into a small
//! JSON-over-HTTP service. It provides:
//!
//! - **Server**: tokio TCP listener with per-connection tasks and graceful
//!   shutdown
//! - **ScorerHandle**: lazily-initialized, load-once model cache
//! - **validation**: the fixed ten-field request schema with
//!   aggregate-all-issues error reporting
//! - **ServerConfig**: every runtime knob, read once at startup
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   HTTP Clients                      │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                      Server                         │
//! │  ┌──────────┐  ┌──────────┐  ┌─────────────────┐   │
//! │  │ /health  │  │  /ready  │  │    /predict     │   │
//! │  └──────────┘  └──────────┘  └─────────────────┘   │
//! └─────────────────────────────────────────────────────┘
//!                     │                │
//!                     ▼                ▼
//!            ┌────────────────┐  ┌────────────┐
//!            │  ScorerHandle  │  │ validation │
//!            └────────────────┘  └────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │        Artifact directory (read-only)               │
//! │   pipeline.bin · feature_names.json · MODEL_VERSION │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! `/health` answers from process state alone. `/ready` and `/predict` force
//! the lazy load; a failure is reported per-request and retried on the next
//! one, so a server started before training finishes becomes ready the
//! moment artifacts appear.
//!
//! # Quick Start
//!
//! ```no_run
//! use triage_serving::{Server, ServerConfig};
//!
//! # async fn example() -> Result<(), triage_serving::ServingError> {
//! let config = ServerConfig::builder()
//!     .host("0.0.0.0")
//!     .port(8000)
//!     .model_dir("artifacts")
//!     .build();
//!
//! let server = Server::bind(config).await?;
//! server.serve().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return [`ServingResult<T>`] wrapping [`ServingError`].
//! Validation failures are the only client errors; everything else maps to
//! a structured 500 body with a stable `"error"` key:
//!
//! ```
//! use triage_serving::error::ServingResult;
//!
//! fn describe(result: ServingResult<f64>) {
//!     match result {
//!         Ok(score) => println!("prediction: {score}"),
//!         Err(e) if e.is_client_error() => println!("bad request: {e}"),
//!         Err(e) => println!("server error: {e}"),
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod scorer;
pub mod server;
pub mod validation;

// Re-export main types at crate root for convenience
pub use config::{ConfigError, ServerConfig, ServerConfigBuilder};
pub use error::{FieldIssue, ServingError, ServingResult};
pub use scorer::{LoadedScorer, ScorerHandle};
pub use server::{AppState, Server};
pub use validation::{validate_payload, FeatureRecord};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
