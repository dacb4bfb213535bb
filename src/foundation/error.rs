pub type ReduceResult<T> = Result<T, ReduceError>;

#[derive(thiserror::Error, Debug)]
pub enum ReduceError {
    #[error("invalid figma url: expected https://www.figma.com/design/FILE_KEY/...")]
    InvalidUrl,

    #[error("no node-id found in url: right-click a frame in figma and copy the link")]
    MissingNodeId,

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("node '{node_id}' not found in figma file")]
    NodeNotFound { node_id: String },

    #[error("figma file not found")]
    FileNotFound,

    #[error("access denied: invalid figma token or no access to this file")]
    AccessDenied,

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReduceError {
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    pub fn node_not_found(node_id: impl Into<String>) -> Self {
        Self::NodeNotFound {
            node_id: node_id.into(),
        }
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
