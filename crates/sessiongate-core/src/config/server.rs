//! HTTP listener and CORS settings.

use serde::{Deserialize, Serialize};

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Name reported by `GET /api/public/info`.
    pub app_name: String,
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// `host:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            app_name: "SessionGate Demo".to_string(),
            cors: CorsConfig::default(),
        }
    }
}

/// `[server.cors]` section. A `"*"` entry in origins or headers allows any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    /// Must include `authorization` for browser callers to send bearer tokens.
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: strings(&["http://localhost:5173"]),
            allowed_methods: strings(&["GET", "POST", "OPTIONS"]),
            allowed_headers: strings(&["authorization", "content-type"]),
            max_age_seconds: 3600,
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
