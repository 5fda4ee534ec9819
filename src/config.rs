use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Server configuration bundle. Loadable from a TOML file, or built in code
/// by embedders before handing it to [`crate::server::FtpServer`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Greeting banner sent in the `220` welcome line.
    pub server_name: String,
    pub listen_host: String,
    pub listen_port: u16,
    /// Inclusive passive port range; `0`/`0` lets the kernel pick.
    pub pasv_min_port: u16,
    pub pasv_max_port: u16,
    /// Dotted-quad advertised in PASV replies, for NAT traversal. When unset
    /// the control channel's local IP is used.
    pub pasv_address: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: String::from("ferroftp"),
            listen_host: String::from("0.0.0.0"),
            listen_port: 21,
            pasv_min_port: 0,
            pasv_max_port: 0,
            pasv_address: None,
        }
    }
}

impl ServerConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))?;
        Ok(config)
    }
}
