//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// HS256 secret used to verify bearer tokens on write routes.
    pub secret: String,
    /// Optional JSON file with the initial product collection.
    #[serde(default)]
    pub seed_file: Option<String>,
}
