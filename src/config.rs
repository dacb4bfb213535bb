use std::{path::PathBuf, time::Duration};

use crate::error::{ReduceError, ReduceResult};

pub const DEFAULT_API_BASE: &str = "https://api.figma.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PORT: u16 = 3000;

/// How to reach the Figma REST API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> ReduceResult<()> {
        let base = self.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ReduceError::config(format!(
                "api base '{}' must be an http(s) url",
                self.api_base
            )));
        }
        if self.timeout.is_zero() {
            return Err(ReduceError::config("fetch timeout must be non-zero"));
        }
        Ok(())
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every path other than the API routes.
    pub static_dir: PathBuf,
    pub fetch: FetchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("public"),
            fetch: FetchConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ReduceResult<()> {
        if self.host.trim().is_empty() {
            return Err(ReduceError::config("host must be non-empty"));
        }
        self.fetch.validate()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Returns the token, or a config error naming where it should have come from.
pub fn require_token(token: Option<String>) -> ReduceResult<String> {
    match token {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ReduceError::config(
            "no figma token: pass --token or set FIGMA_TOKEN (a .env file works too)",
        )),
    }
}
