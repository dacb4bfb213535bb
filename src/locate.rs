use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ReduceError, ReduceResult};

static DOCUMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"figma\.com/(?:file|design)/([a-zA-Z0-9]+)").expect("document regex is valid")
});

// Browsers may percent-encode the colon form.
static NODE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"node-id=([0-9]+)(?:-|:|%3[aA])([0-9]+)").expect("node-id regex is valid")
});

/// Identifies one node inside one Figma document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub document_id: String,
    /// Always in the colon-separated form the REST API expects.
    pub node_id: String,
}

impl DocumentRef {
    pub fn new(document_id: impl Into<String>, node_id: &str) -> ReduceResult<Self> {
        Ok(Self {
            document_id: document_id.into(),
            node_id: normalize_node_id(node_id)?,
        })
    }
}

/// Parses a `https://www.figma.com/{file,design}/KEY/...?node-id=A-B` link.
///
/// Pure string parsing; nothing is fetched.
pub fn locate(url: &str) -> ReduceResult<DocumentRef> {
    let document_id = DOCUMENT_RE
        .captures(url)
        .map(|c| c[1].to_string())
        .ok_or(ReduceError::InvalidUrl)?;

    let node = NODE_ID_RE
        .captures(url)
        .ok_or(ReduceError::MissingNodeId)?;

    Ok(DocumentRef {
        document_id,
        node_id: format!("{}:{}", &node[1], &node[2]),
    })
}

/// Accepts `12-34`, `12:34` or `12%3A34` and returns `12:34`.
pub fn normalize_node_id(raw: &str) -> ReduceResult<String> {
    let raw = raw.trim();
    let (a, b) = raw
        .split_once(':')
        .or_else(|| raw.split_once('-'))
        .or_else(|| raw.split_once("%3A"))
        .or_else(|| raw.split_once("%3a"))
        .ok_or(ReduceError::MissingNodeId)?;

    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !numeric(a) || !numeric(b) {
        return Err(ReduceError::MissingNodeId);
    }
    Ok(format!("{a}:{b}"))
}
