//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings needed to start the HTTP server.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Origins allowed by CORS; empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}
