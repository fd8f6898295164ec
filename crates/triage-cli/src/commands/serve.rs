//! Serve Command Implementation
//!
//! Binds the HTTP scoring server and runs it until the process receives an
//! interrupt.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::{info, warn};
use triage_serving::{Server, ServerConfig};

/// Serve predictions over HTTP
///
/// The server starts immediately and answers liveness probes even when the
/// artifact directory is empty; the model is loaded lazily on the first
/// request that needs it.
///
/// # Example
///
/// ```bash
/// triage serve \
///     --model-dir artifacts \
///     --port 8000
/// ```
#[derive(Args, Debug, Clone)]
pub struct ServeCommand {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "TRIAGE_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', default_value = "8000", env = "TRIAGE_PORT")]
    pub port: u16,

    /// Directory containing the trained artifacts
    #[arg(long, short = 'd', default_value = "artifacts", env = "TRIAGE_MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Path the JSON API docs are served under
    #[arg(long, default_value = "/docs", env = "TRIAGE_DOCS_URL")]
    pub docs_url: String,

    /// Disable the docs endpoint and the root redirect to it
    #[arg(long, env = "TRIAGE_DISABLE_DOCS")]
    pub disable_docs: bool,

    /// Upper bound on request body size in bytes
    #[arg(long, default_value = "65536")]
    pub max_body_bytes: usize,
}

impl ServeCommand {
    /// Execute the serve command
    pub async fn run(&self) -> Result<()> {
        info!("Starting scoring server...");
        info!("Model directory: {:?}", self.model_dir);
        info!("Listening on {}:{}", self.host, self.port);

        if !self.model_dir.exists() {
            warn!(
                "Model directory {:?} does not exist yet; predictions will fail until it is trained",
                self.model_dir
            );
        }

        let mut builder = ServerConfig::builder()
            .host(self.host.clone())
            .port(self.port)
            .model_dir(self.model_dir.clone())
            .max_body_bytes(self.max_body_bytes);
        builder = if self.disable_docs {
            builder.disable_docs()
        } else {
            builder.docs_url(self.docs_url.clone())
        };

        let server = Server::bind(builder.build())
            .await
            .context("Failed to bind server")?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received shutdown signal, stopping server...");
                let _ = shutdown_tx.send(true);
            }
        });

        server
            .serve_with_shutdown(shutdown_rx)
            .await
            .context("Server failed")?;

        Ok(())
    }

    /// Get the full bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
