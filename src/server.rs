use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    error::{ReduceError, ReduceResult},
    fetch::{FigmaClient, build_http},
    locate::locate,
    reduce::{ReducedNode, reduce},
};

/// Shared by all requests. Holds no per-request data; the token arrives in each request body.
#[derive(Clone, Debug)]
pub struct AppState {
    http: reqwest::Client,
    api_base: Arc<str>,
}

impl AppState {
    pub fn new(http: reqwest::Client, api_base: &str) -> Self {
        Self {
            http,
            api_base: Arc::from(api_base),
        }
    }

    pub fn from_config(config: &ServerConfig) -> ReduceResult<Self> {
        config.validate()?;
        Ok(Self::new(build_http(&config.fetch)?, &config.fetch.api_base))
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReduceRequest {
    #[serde(default)]
    pub figma_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wraps [`ReduceError`] for the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub ReduceError);

impl From<ReduceError> for ApiError {
    fn from(err: ReduceError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ReduceError::MissingInput(_) | ReduceError::InvalidUrl | ReduceError::MissingNodeId => {
                StatusCode::BAD_REQUEST
            }
            ReduceError::AccessDenied => StatusCode::FORBIDDEN,
            ReduceError::NodeNotFound { .. } | ReduceError::FileNotFound => StatusCode::NOT_FOUND,
            ReduceError::Upstream(_)
            | ReduceError::Config(_)
            | ReduceError::Serde(_)
            | ReduceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "reduce request failed");
        } else {
            tracing::info!(%status, error = %self.0, "reduce request rejected");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// API routes only.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/reduce", post(post_reduce))
        .with_state(state)
}

/// API routes plus static files from `config.static_dir` for everything else.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    api_router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
}

async fn post_reduce(
    State(state): State<AppState>,
    body: Result<Json<ReduceRequest>, JsonRejection>,
) -> Result<Json<ReducedNode>, ApiError> {
    let Json(req) = body.map_err(|e| ReduceError::missing_input(e.body_text()))?;

    let (Some(figma_url), Some(token)) = (non_blank(req.figma_url), non_blank(req.token)) else {
        return Err(ReduceError::missing_input("missing figmaUrl or token").into());
    };

    let doc = locate(&figma_url)?;
    tracing::info!(document_id = %doc.document_id, node_id = %doc.node_id, "reducing node");

    let client = FigmaClient::with_http(state.http.clone(), &state.api_base, token);
    let node = client.fetch_node(&doc).await?;

    let reduced = reduce(Some(&node)).unwrap_or_default();
    tracing::debug!(nodes = reduced.node_count(), "reduced");
    Ok(Json(reduced))
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Binds `config.bind_addr()` and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    use anyhow::Context as _;

    let state = AppState::from_config(&config)?;
    let app = router(state, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind '{addr}'"))?;
    let local = listener.local_addr().context("read bound address")?;
    tracing::info!(
        static_dir = %config.static_dir.display(),
        "server running at http://{local}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve http")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
