/// Language model settings for the agent runner
///
/// Loaded from a YAML file. The API key may be left out of the file and
/// supplied through `AZURE_OPENAI_API_KEY` instead.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

pub const API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";

/// Azure-hosted chat model
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub deployment_name: String,
    pub model_name: String,
    #[serde(alias = "openai_api_version")]
    pub api_version: String,
    #[serde(alias = "azure_endpoint")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl LlmConfig {
    /// Read the YAML file at `path`, falling back to the environment for the key
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read LLM config '{}'", path.display()))?;

        Self::from_yaml(&raw, std::env::var(API_KEY_ENV).ok())
            .with_context(|| format!("invalid LLM config '{}'", path.display()))
    }

    /// Parse YAML and make sure an API key is available
    pub fn from_yaml(raw: &str, fallback_key: Option<String>) -> Result<Self> {
        let mut config: LlmConfig = serde_yaml::from_str(raw)?;

        if config.api_key.as_deref().map_or(true, str::is_empty) {
            config.api_key = fallback_key.filter(|key| !key.is_empty());
        }
        if config.api_key.is_none() {
            bail!("no API key in config and {} is not set", API_KEY_ENV);
        }

        Ok(config)
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("deployment_name", &self.deployment_name)
            .field("model_name", &self.model_name)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r#"
deployment_name: gpt4-deployment
model_name: gpt-4
openai_api_version: "2023-05-15"
azure_endpoint: https://example.openai.azure.com/
"#;

    #[test]
    fn key_comes_from_fallback_when_missing_in_file() {
        let config = LlmConfig::from_yaml(YAML, Some("secret".to_string())).unwrap();
        assert_eq!(config.api_version, "2023-05-15");
        assert_eq!(config.base_url, "https://example.openai.azure.com/");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn key_in_file_wins() {
        let yaml = format!("{}api_key: from-file\n", YAML);
        let config = LlmConfig::from_yaml(&yaml, Some("from-env".to_string())).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn missing_key_is_an_error() {
        assert!(LlmConfig::from_yaml(YAML, None).is_err());
        assert!(LlmConfig::from_yaml(YAML, Some(String::new())).is_err());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = LlmConfig::from_yaml(YAML, Some("secret".to_string())).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}api_key: on-disk", YAML).unwrap();

        let config = LlmConfig::load(file.path()).unwrap();
        assert_eq!(config.deployment_name, "gpt4-deployment");
        assert_eq!(config.api_key.as_deref(), Some("on-disk"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = LlmConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read LLM config"));
    }
}
