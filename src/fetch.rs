use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::{
    config::FetchConfig,
    error::{ReduceError, ReduceResult},
    foundation::depth,
    locate::DocumentRef,
    model::RawNode,
};

pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// Thin client for `GET /v1/files/:key/nodes`.
///
/// Cloning is cheap; the underlying connection pool is shared. There is no retry and no cache.
#[derive(Clone, Debug)]
pub struct FigmaClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(serde::Deserialize)]
struct NodesResponse {
    #[serde(default)]
    nodes: Map<String, Value>,
}

#[derive(serde::Deserialize)]
struct ApiErrorBody {
    err: Option<String>,
}

impl FigmaClient {
    pub fn new(config: &FetchConfig, token: impl Into<String>) -> ReduceResult<Self> {
        config.validate()?;
        let http = build_http(config)?;
        Ok(Self::with_http(http, &config.api_base, token))
    }

    /// Reuses an existing `reqwest` client, e.g. one shared across server requests.
    pub fn with_http(http: reqwest::Client, api_base: &str, token: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetches the raw entry for one node, exactly as the API returned it.
    #[tracing::instrument(skip(self), fields(document_id = %doc.document_id, node_id = %doc.node_id))]
    pub async fn fetch_entry(&self, doc: &DocumentRef) -> ReduceResult<Value> {
        let url = format!("{}/v1/files/{}/nodes", self.api_base, doc.document_id);
        tracing::debug!(%url, "requesting node");

        let resp = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .query(&[("ids", doc.node_id.as_str())])
            .send()
            .await
            .map_err(|e| ReduceError::upstream(e.to_string()))?;

        let status = resp.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::warn!(%status, "figma rejected the token");
                return Err(ReduceError::AccessDenied);
            }
            StatusCode::NOT_FOUND => return Err(ReduceError::FileNotFound),
            s if !s.is_success() => {
                let body = resp.text().await.unwrap_or_default();
                return Err(ReduceError::upstream(status_message(s, &body)));
            }
            _ => {}
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ReduceError::upstream(format!("read nodes response: {e}")))?;
        let body: NodesResponse = depth::parse_json(&bytes)
            .map_err(|e| ReduceError::upstream(format!("decode nodes response: {e}")))?;
        take_entry(body.nodes, &doc.node_id)
    }

    /// Fetches one node and decodes it into a [`RawNode`].
    pub async fn fetch_node(&self, doc: &DocumentRef) -> ReduceResult<RawNode> {
        let entry = self.fetch_entry(doc).await?;
        RawNode::from_entry(&entry)
    }
}

pub fn build_http(config: &FetchConfig) -> ReduceResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("figma-reduce/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ReduceError::config(format!("build http client: {e}")))
}

// The API answers `{"nodes": {"<id>": null}}` for ids it does not know.
fn take_entry(mut nodes: Map<String, Value>, node_id: &str) -> ReduceResult<Value> {
    match nodes.remove(node_id) {
        Some(entry) if !entry.is_null() => Ok(entry),
        _ => Err(ReduceError::node_not_found(node_id)),
    }
}

fn status_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.err);
    match detail {
        Some(err) => format!("request failed with status code {}: {err}", status.as_u16()),
        None => format!("request failed with status code {}", status.as_u16()),
    }
}
