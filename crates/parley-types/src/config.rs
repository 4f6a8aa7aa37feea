//! Server configuration for Parley.

use serde::{Deserialize, Serialize};

/// Configuration loaded from `parley.toml`.
///
/// Every field has a default so a missing or partial file still yields a
/// runnable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP gateway binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP gateway binds to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model identifier used when the caller does not pick one.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// System instruction establishing the assistant's persona. Sent as
    /// the first message of every provider call.
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8402
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_system_instruction() -> String {
    "You are a helpful assistant.".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_model: default_model(),
            system_instruction: default_system_instruction(),
        }
    }
}
