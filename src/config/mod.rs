/// Configuration management for the agentdeck service
///
/// Handles server binding, optional registry persistence and the agent
/// pipeline collaborators. Every value can be overridden from the environment.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Registry persistence configuration
    pub database: DatabaseConfig,
    /// Agent pipeline collaborators
    pub agents: AgentsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Registry persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite URL (e.g. "sqlite://data/agentdeck.db"). Registries are
    /// memory-only when unset.
    pub url: Option<String>,
}

/// Settings for the research pipeline binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Path to the YAML file describing the language model
    pub llm_config_path: String,
    /// Endpoint of the external agent runner
    pub runner_url: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("AGENTDECK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("AGENTDECK_PORT")
                    .unwrap_or_else(|_| "3004".to_string())
                    .parse()
                    .unwrap_or(3004),
            },
            database: DatabaseConfig {
                url: std::env::var("AGENTDECK_DATABASE_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
            },
            agents: AgentsConfig {
                llm_config_path: std::env::var("AGENTDECK_LLM_CONFIG")
                    .unwrap_or_else(|_| "config.yaml".to_string()),
                runner_url: std::env::var("AGENTDECK_AGENT_RUNNER_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8000/kickoff".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }
}
