use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use anyhow::Result;

use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::agent::stateless_llm::openai_compatible_llm::OpenAICompatibleLLM;
use crate::config::LLMConfig;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configuration.
    ///
    /// All supported providers speak the OpenAI chat completions protocol,
    /// they only differ in the endpoint and credentials in `config`.
    pub fn create_llm(config: &LLMConfig) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {}", config.llm_provider);

        match config.llm_provider.as_str() {
            "openai_compatible_llm" | "openai_llm" | "ollama_llm" | "gemini_llm"
            | "deepseek_llm" | "groq_llm" | "mistral_llm" => {
                Ok(Arc::new(OpenAICompatibleLLM::new(
                    config.model.clone(),
                    config.base_url.clone(),
                    config.llm_api_key.clone(),
                    config.temperature,
                    Duration::from_secs(config.timeout_secs),
                )?))
            }
            other => Err(anyhow::anyhow!("Unsupported LLM provider: {}", other)),
        }
    }
}
