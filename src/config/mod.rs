//! Configuration management.
//!
//! Configuration is read once at process start: defaults come from the
//! environment, and an optional config file can layer on top. There is no
//! hot reload.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Language model backend settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Paper search settings
    #[serde(default)]
    pub papers: PaperSearchConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// The bind address as `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Language model backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Path to a local model, for a future local backend
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// API key for a remote backend (optional)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whether to use a remote model backend instead of the mock
    #[serde(default)]
    pub use_remote: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model_path: std::env::var("LLM_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_model_path()),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            use_remote: std::env::var("USE_OPENAI")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/llama-2-7b-chat.gguf")
}

/// Paper search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSearchConfig {
    /// Override for the scholarly API base URL
    #[serde(default)]
    pub api_base: Option<String>,

    /// Semantic Scholar API key (optional, for higher rate limits)
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for PaperSearchConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            api_key: std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok(),
        }
    }
}

/// Load configuration from a file, layered with environment variables
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("RESEARCHGPT"))
        .build()?;

    settings.try_deserialize()
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.address(), "0.0.0.0:8000");
    }
}
