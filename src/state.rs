use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::agent::{AgentFactory, ReasoningAgent, StatelessLLMFactory};
use crate::config::Config;
use crate::ui::{NextGenUiAgent, UiAgent, UiRenderConfig};

/// Process-wide state, built once at startup and shared read-only by all requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reasoning_agent: Arc<dyn ReasoningAgent>,
    pub ui_agent: Arc<dyn UiAgent>,
    pub ui_render_config: UiRenderConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build the model client and both agents from `config`
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = StatelessLLMFactory::create_llm(&config.llm_config)?;
        let reasoning_agent = AgentFactory::create_agent(&config.agent_config, llm.clone())?;
        let ui_agent = Arc::new(NextGenUiAgent::new(
            llm,
            config.ui_config.unsupported_components,
        ));

        Ok(Self::with_agents(config, reasoning_agent, ui_agent))
    }

    pub fn with_agents(
        config: Config,
        reasoning_agent: Arc<dyn ReasoningAgent>,
        ui_agent: Arc<dyn UiAgent>,
    ) -> Self {
        let ui_render_config = UiRenderConfig::new(config.ui_config.component_system.clone());
        Self {
            config: Arc::new(config),
            reasoning_agent,
            ui_agent,
            ui_render_config,
            started_at: Utc::now(),
        }
    }
}
