//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_request_timeout() -> u64 {
    15
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Base URL of the battalion REST backend.
    pub api_url: String,
    /// Timeout applied to every backend call, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    pub templates_dir: String,
    pub secret: String,
}
