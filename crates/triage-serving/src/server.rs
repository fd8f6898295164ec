//! The HTTP server: listener lifecycle, routing, and endpoint handlers.

use crate::config::ServerConfig;
use crate::error::{ServingError, ServingResult};
use crate::http::{self, ReadOutcome, Request};
use crate::scorer::ScorerHandle;
use crate::validation;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Shared per-process serving state handed to every connection task.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    scorer: ScorerHandle,
}

impl AppState {
    /// Build the state for a configuration.
    pub fn new(config: ServerConfig) -> Self {
        let scorer = ScorerHandle::new(config.model_dir.clone());
        Self {
            config: Arc::new(config),
            scorer,
        }
    }
}

/// A bound scoring server, ready to serve.
///
/// # Example
///
/// ```no_run
/// use triage_serving::{Server, ServerConfig};
///
/// # async fn example() -> Result<(), triage_serving::ServingError> {
/// let config = ServerConfig::builder().port(8000).build();
/// let server = Server::bind(config).await?;
/// server.serve().await?;
/// # Ok(())
/// # }
/// ```
pub struct Server {
    state: AppState,
    listener: TcpListener,
}

impl Server {
    /// Validate the configuration and bind the listening socket.
    pub async fn bind(config: ServerConfig) -> ServingResult<Server> {
        config
            .validate()
            .map_err(|e| ServingError::config(e.to_string()))?;

        let listener = TcpListener::bind(config.socket_addr()).await?;
        info!(
            addr = %listener.local_addr()?,
            model_dir = %config.model_dir.display(),
            docs = config.docs_url.as_deref().unwrap_or("disabled"),
            "Server listening"
        );

        Ok(Server {
            state: AppState::new(config),
            listener,
        })
    }

    /// The bound address, useful when the configured port was 0.
    pub fn local_addr(&self) -> ServingResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process exits.
    pub async fn serve(self) -> ServingResult<()> {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.serve_with_shutdown(shutdown_rx).await
    }

    /// Serve until `shutdown` flips to true.
    ///
    /// In-flight connection tasks finish on their own; only the accept loop
    /// stops.
    pub async fn serve_with_shutdown(
        self,
        mut shutdown: watch::Receiver<bool>,
    ) -> ServingResult<()> {
        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let state = self.state.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, state).await {
                                    debug!(peer = %peer, error = %e, "Connection error");
                                }
                            });
                        }
                        Err(e) => warn!(error = %e, "Accept failed"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Shutdown requested, stopping listener");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// One response on its way out.
enum Reply {
    Json { status: u16, body: String },
    Redirect { location: String },
}

impl Reply {
    fn json(status: u16, value: serde_json::Value) -> Self {
        Reply::Json {
            status,
            body: value.to_string(),
        }
    }

    fn status(&self) -> u16 {
        match self {
            Reply::Json { status, .. } => *status,
            Reply::Redirect { .. } => 307,
        }
    }
}

async fn handle_connection(mut stream: TcpStream, state: AppState) -> ServingResult<()> {
    let outcome = http::read_request(&mut stream, state.config.max_body_bytes).await?;
    let request = match outcome {
        ReadOutcome::Closed => return Ok(()),
        ReadOutcome::Malformed => {
            return http::write_json(&mut stream, 400, &json!({ "error": "Malformed request" }).to_string()).await;
        }
        ReadOutcome::BodyTooLarge => {
            return http::write_json(&mut stream, 413, &json!({ "error": "Request body too large" }).to_string()).await;
        }
        ReadOutcome::Request(request) => request,
    };

    let reply = route(&request, &state).await;
    debug!(
        method = %request.method,
        path = %request.path,
        status = reply.status(),
        "Handled request"
    );

    match reply {
        Reply::Json { status, body } => http::write_json(&mut stream, status, &body).await,
        Reply::Redirect { location } => http::write_redirect(&mut stream, &location).await,
    }
}

async fn route(request: &Request, state: &AppState) -> Reply {
    let docs_path = state.config.docs_url.as_deref();

    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/health") => handle_health(state),
        ("GET", "/ready") => handle_ready(state).await,
        ("POST", "/predict") => handle_predict(&request.body, state).await,
        ("GET", "/") => handle_root(state),
        ("GET", path) if Some(path) == docs_path => handle_docs(state),
        (_, "/health") | (_, "/ready") | (_, "/predict") | (_, "/") => method_not_allowed(),
        (_, path) if Some(path) == docs_path => method_not_allowed(),
        _ => not_found(),
    }
}

/// Liveness: always succeeds and never touches the artifact store.
fn handle_health(state: &AppState) -> Reply {
    Reply::json(
        200,
        json!({ "status": "ok", "model_version": state.scorer.model_version() }),
    )
}

/// Readiness: forces the lazy load so orchestrators can gate traffic.
async fn handle_ready(state: &AppState) -> Reply {
    match state.scorer.get().await {
        Ok(_) => Reply::json(
            200,
            json!({ "status": "ready", "model_version": state.scorer.model_version() }),
        ),
        Err(e) => load_failure_reply(e),
    }
}

async fn handle_predict(body: &[u8], state: &AppState) -> Reply {
    // Validation runs before any artifact access, so schema errors never
    // depend on model state.
    let record = match validation::validate_payload(body) {
        Ok(record) => record,
        Err(ServingError::InvalidPayload(issues)) => {
            return Reply::json(400, json!({ "error": "Invalid payload", "issues": issues }));
        }
        Err(other) => return prediction_failure_reply(other),
    };

    let scorer = match state.scorer.get().await {
        Ok(scorer) => scorer,
        Err(e) => return load_failure_reply(e),
    };

    let row = match record.ordered_by(scorer.feature_names()) {
        Ok(row) => row,
        Err(e) => return prediction_failure_reply(e),
    };

    match scorer.predict(&row) {
        Ok(prediction) => Reply::json(200, json!({ "prediction": prediction })),
        Err(e) => prediction_failure_reply(e),
    }
}

/// Root: point clients at the docs, or report status when docs are off.
fn handle_root(state: &AppState) -> Reply {
    match &state.config.docs_url {
        Some(path) => Reply::Redirect {
            location: path.clone(),
        },
        None => Reply::json(
            200,
            json!({
                "status": "ok",
                "model_version": state.scorer.model_version(),
                "docs": "disabled"
            }),
        ),
    }
}

/// A scaled-down service descriptor standing in for interactive API docs.
fn handle_docs(state: &AppState) -> Reply {
    Reply::json(
        200,
        json!({
            "title": "Diabetes Progression Triage API",
            "version": crate::VERSION,
            "model_version": state.scorer.model_version(),
            "endpoints": {
                "GET /health": "Liveness probe; never touches the artifact store",
                "GET /ready": "Forces a model load and reports readiness",
                "POST /predict": "Scores one ten-field feature record",
            },
            "example_payload": {
                "age": 0.02, "sex": -0.044, "bmi": 0.06, "bp": -0.03,
                "s1": -0.02, "s2": 0.03, "s3": -0.02, "s4": 0.02,
                "s5": 0.02, "s6": -0.001
            },
        }),
    )
}

fn method_not_allowed() -> Reply {
    Reply::json(405, json!({ "error": "Method not allowed" }))
}

fn not_found() -> Reply {
    Reply::json(404, json!({ "error": "Not found" }))
}

/// Map a load failure onto the two stable 500 bodies clients key on.
fn load_failure_reply(err: ServingError) -> Reply {
    match err {
        ServingError::ArtifactsMissing => {
            Reply::json(500, json!({ "error": "Model artifacts missing" }))
        }
        ServingError::ModelLoad(reason) => Reply::json(
            500,
            json!({ "error": "Failed to load model", "reason": reason }),
        ),
        other => prediction_failure_reply(other),
    }
}

fn prediction_failure_reply(err: ServingError) -> Reply {
    warn!(error = %err, "Request failed");
    let reason = match err {
        ServingError::Prediction(reason) => reason,
        other => other.to_string(),
    };
    Reply::json(500, json!({ "error": "Prediction failed", "reason": reason }))
}
