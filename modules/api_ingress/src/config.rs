use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;

/// HTTP host configuration, read from `modules.api_ingress`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    #[serde(default)]
    pub cors_enabled: bool,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT_BYTES
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SEC
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            cors_enabled: false,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            request_timeout_sec: DEFAULT_REQUEST_TIMEOUT_SEC,
        }
    }
}

impl ApiIngressConfig {
    pub fn request_timeout(&self) -> Duration {
        // 0 would time out every request; fall back to the default
        match self.request_timeout_sec {
            0 => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SEC),
            s => Duration::from_secs(s),
        }
    }
}
