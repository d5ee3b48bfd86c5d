use std::sync::Arc;
use tracing::info;
use anyhow::Result;

use crate::agent::agents::{ReactAgent, ReasoningAgent};
use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::agent::tools::{SearchMovieTool, ToolRegistry};
use crate::config::AgentConfig;

/// Factory for creating agent instances
pub struct AgentFactory;

impl AgentFactory {
    /// Create the movies reasoning agent.
    ///
    /// # Arguments
    /// * `agent_config` - System prompt and iteration limit
    /// * `llm` - Shared model client
    pub fn create_agent(
        agent_config: &AgentConfig,
        llm: Arc<dyn StatelessLLMInterface>,
    ) -> Result<Arc<dyn ReasoningAgent>> {
        info!("Initializing agent: react_agent");

        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(SearchMovieTool::new()?))?;

        Ok(Arc::new(ReactAgent::new(
            llm,
            agent_config.system_prompt.clone(),
            tools,
            agent_config.max_iterations,
        )))
    }
}
