//! HTTP server mode for REST API access to the adapters

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::{get_adapter, ADAPTERS};
use crate::config::InvocationVars;
use crate::engine::AdapterRunner;
use crate::error::{Error, Result};

/// Request body for the run endpoint
#[derive(Debug, Default, Deserialize)]
struct RunRequest {
    /// Connection variables (`pipedrive_connection`, legacy keys, `http`)
    #[serde(default = "empty_object")]
    vars: Value,
    /// Positional input array
    #[serde(default = "empty_array")]
    input: Value,
}

fn empty_object() -> Value {
    json!({})
}

fn empty_array() -> Value {
    json!([])
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Server settings chosen by the operator
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerOptions {
    /// Fill credentials missing from a request from the process environment.
    /// Off by default: callers then supply their own credentials.
    pub env_credentials: bool,
}

/// Build the application router
pub fn router(options: ServerOptions) -> Router {
    // Build CORS layer - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/adapters", get(list_adapters))
        .route("/adapters/:name", get(describe_adapter))
        .route("/adapters/:name/run", post(run_adapter))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(options))
}

/// Start the HTTP server
pub async fn serve(port: u16, options: ServerOptions) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);
    if options.env_credentials {
        tracing::warn!("Requests without credentials will use the environment's credentials");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, router(options))
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// List built-in adapters
async fn list_adapters() -> impl IntoResponse {
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

    Json(ApiResponse::success(json!({
        "type": "ADAPTERS",
        "adapters": adapters
    })))
}

/// Describe one adapter
async fn describe_adapter(Path(name): Path<String>) -> Response {
    match get_adapter(&name) {
        Some(adapter) => Json(ApiResponse::success(adapter.describe())).into_response(),
        None => not_found(&name),
    }
}

/// Run an adapter and return its output verbatim
async fn run_adapter(
    State(options): State<Arc<ServerOptions>>,
    Path(name): Path<String>,
    Json(req): Json<RunRequest>,
) -> Response {
    let Some(adapter) = get_adapter(&name) else {
        return not_found(&name);
    };

    let vars = match InvocationVars::from_json(req.vars) {
        Ok(vars) if options.env_credentials => vars.with_env_fallback(),
        Ok(vars) => vars,
        Err(e) => return error_response(&e),
    };

    let mut body = Vec::new();
    match AdapterRunner::new(adapter)
        .run(&vars, &req.input, &mut body)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, adapter.output_format().content_type())],
            Body::from(body),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(adapter = adapter.name, error = %e, "Run failed");
            error_response(&e)
        }
    }
}

fn not_found(name: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(format!("Adapter not found: {name}"))),
    )
        .into_response()
}

fn error_response(e: &Error) -> Response {
    (status_for(e), Json(ApiResponse::<()>::error(e.to_string()))).into_response()
}

/// HTTP status reported for a failed run
fn status_for(e: &Error) -> StatusCode {
    match e {
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        Error::Config { .. }
        | Error::MissingConfigField { .. }
        | Error::JsonParse(_)
        | Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        Error::UnknownAdapter { .. } => StatusCode::NOT_FOUND,
        e if e.is_upstream_error() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
