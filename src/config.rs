use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::ui::renderers::{COMPONENT_SYSTEMS, JSON_COMPONENT_SYSTEM};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub llm_config: LLMConfig,
    #[serde(default)]
    pub agent_config: AgentConfig,
    #[serde(default)]
    pub ui_config: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Model client settings, shared by the reasoning agent and the UI agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_api_key")]
    pub llm_api_key: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_provider() -> String {
    "ollama_llm".to_string()
}

fn default_model() -> String {
    "granite3-dense:8b".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_llm_api_key() -> String {
    "ollama".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            model: default_model(),
            base_url: default_base_url(),
            llm_api_key: default_llm_api_key(),
            temperature: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Used in place of an absent or empty prompt
    #[serde(default = "default_fallback_prompt")]
    pub fallback_prompt: String,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_system_prompt() -> String {
    "You are useful movies assistant to answer user questions".to_string()
}

fn default_fallback_prompt() -> String {
    "Give me details of toy story".to_string()
}

fn default_max_iterations() -> usize {
    8
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            fallback_prompt: default_fallback_prompt(),
            max_iterations: default_max_iterations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_component_system")]
    pub component_system: String,
    /// Allow `table` and `set-of-cards` in component selection
    #[serde(default)]
    pub unsupported_components: bool,
}

fn default_component_system() -> String {
    JSON_COMPONENT_SYSTEM.to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            component_system: default_component_system(),
            unsupported_components: false,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env_vars(&read_text_file(path)?);

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.system_config.port == 0 {
            anyhow::bail!("system_config.port must be non-zero");
        }
        if self.llm_config.model.trim().is_empty() {
            anyhow::bail!("llm_config.model must not be empty");
        }
        if self.llm_config.base_url.trim().is_empty() {
            anyhow::bail!("llm_config.base_url must not be empty");
        }
        if self.agent_config.max_iterations == 0 {
            anyhow::bail!("agent_config.max_iterations must be at least 1");
        }
        if !COMPONENT_SYSTEMS.contains(&self.ui_config.component_system.as_str()) {
            anyhow::bail!(
                "ui_config.component_system '{}' is not supported (expected one of: {})",
                self.ui_config.component_system,
                COMPONENT_SYSTEMS.join(", ")
            );
        }
        Ok(())
    }
}

/// Read a config file, dropping a UTF-8 BOM if present
fn read_text_file(path: &str) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        debug!("Config file {} contained invalid UTF-8, replaced lossy", path);
    }
    Ok(text.into_owned())
}

/// Replace `${VAR_NAME}` with the environment value. Unset variables are kept verbatim.
pub fn substitute_env_vars(content: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"\$\{(\w+)\}").expect("valid env var pattern"));
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn defaults_match_demo_setup() {
        let config = Config::default();
        assert_eq!(config.system_config.port, 5000);
        assert_eq!(config.llm_config.model, "granite3-dense:8b");
        assert_eq!(config.llm_config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.agent_config.fallback_prompt, "Give me details of toy story");
        assert_eq!(config.ui_config.component_system, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_partial_yaml_with_defaults() {
        let file = write_temp(
            ".yaml",
            b"system_config:\n  port: 8080\nllm_config:\n  model: llama3\n",
        );
        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.system_config.port, 8080);
        assert_eq!(config.system_config.host, "127.0.0.1");
        assert_eq!(config.llm_config.model, "llama3");
        assert_eq!(config.llm_config.llm_provider, "ollama_llm");
    }

    #[test]
    fn loads_json_with_bom() {
        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(br#"{"agent_config": {"max_iterations": 3}}"#);
        let file = write_temp(".json", &content);
        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.agent_config.max_iterations, 3);
    }

    #[test]
    fn rejects_zero_iterations() {
        let file = write_temp(".yaml", b"agent_config:\n  max_iterations: 0\n");
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn rejects_unknown_component_system() {
        let file = write_temp(".yaml", b"ui_config:\n  component_system: patternfly\n");
        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("patternfly"));

        let file = write_temp(".yaml", b"ui_config:\n  component_system: json\n");
        assert!(Config::load(file.path().to_str().unwrap()).is_ok());
    }

    #[test]
    fn missing_file_is_error() {
        assert!(Config::load("/definitely/not/here.yaml").is_err());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("NGUI_TEST_API_KEY", "secret");
        let out = substitute_env_vars("key: ${NGUI_TEST_API_KEY}\nother: ${NGUI_TEST_UNSET_VAR}");
        assert_eq!(out, "key: secret\nother: ${NGUI_TEST_UNSET_VAR}");
    }
}
