use std::time::Duration;

use runtime::ServerConfig;
use serde::{Deserialize, Serialize};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// HTTP listener settings derived from the `server` config section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebIngressConfig {
    pub bind_addr: String,
    /// Per-request timeout in seconds; `0` selects the default of 30s.
    #[serde(default)]
    pub timeout_sec: u64,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT_BYTES
}

impl Default for WebIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            timeout_sec: 0,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl WebIngressConfig {
    pub fn from_server(server: &ServerConfig) -> Self {
        Self {
            bind_addr: format!("{}:{}", server.host, server.port),
            timeout_sec: server.timeout_sec,
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        match self.timeout_sec {
            0 => DEFAULT_REQUEST_TIMEOUT,
            s => Duration::from_secs(s),
        }
    }
}
