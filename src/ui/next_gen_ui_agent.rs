use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::component_selection::select_component;
use super::components::{UiComponent, SUPPORTED_COMPONENTS, UNSUPPORTED_COMPONENTS};
use super::data_transformation::transform;
use super::renderers::{ComponentRenderer, JsonRenderer};
use super::ui_agent::{InputData, Rendition, UiAgent, UiAgentOutput, UiRenderConfig};
use crate::agent::messages::AgentState;
use crate::agent::stateless_llm::StatelessLLMInterface;

/// UI agent: for every tool result in the conversation, asks the model which
/// component fits the data, fills the component from the data and renders it
/// with the requested component system.
pub struct NextGenUiAgent {
    llm: Arc<dyn StatelessLLMInterface>,
    allowed_components: Vec<&'static str>,
    renderers: Vec<Arc<dyn ComponentRenderer>>,
}

impl NextGenUiAgent {
    /// # Arguments
    /// * `llm` - Model used for component selection
    /// * `unsupported_components` - Also offer `table` and `set-of-cards`
    pub fn new(llm: Arc<dyn StatelessLLMInterface>, unsupported_components: bool) -> Self {
        let mut allowed_components = SUPPORTED_COMPONENTS.to_vec();
        if unsupported_components {
            allowed_components.extend_from_slice(UNSUPPORTED_COMPONENTS);
        }
        info!(
            "NextGenUiAgent initialized with components: {}",
            allowed_components.join(", ")
        );

        Self {
            llm,
            allowed_components,
            renderers: vec![Arc::new(JsonRenderer)],
        }
    }

    fn renderer(&self, component_system: &str) -> Result<&Arc<dyn ComponentRenderer>> {
        self.renderers
            .iter()
            .find(|r| r.component_system() == component_system)
            .ok_or_else(|| anyhow!("Unsupported component system: {}", component_system))
    }

    /// Tool results of the conversation, in order
    fn input_data(state: &AgentState) -> Vec<InputData> {
        state
            .tool_messages()
            .enumerate()
            .map(|(index, message)| InputData {
                id: message
                    .tool_call_id
                    .clone()
                    .unwrap_or_else(|| format!("data-{}", index)),
                data: message.content.clone(),
            })
            .collect()
    }

    async fn design(&self, prompt: &str, input: &InputData) -> Result<UiComponent> {
        let selection =
            select_component(self.llm.as_ref(), prompt, input, &self.allowed_components).await?;

        let data = serde_json::from_str(&input.data)
            .unwrap_or_else(|_| Value::String(input.data.clone()));
        let component = transform(&selection, &input.id, &data);
        debug!("Designed {} component for {}", component.kind(), input.id);
        Ok(component)
    }
}

#[async_trait]
impl UiAgent for NextGenUiAgent {
    async fn invoke(&self, state: &AgentState, config: &UiRenderConfig) -> Result<UiAgentOutput> {
        let renderer = self.renderer(&config.component_system)?;

        let prompt = state
            .last_user_message()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let inputs = Self::input_data(state);
        if inputs.is_empty() {
            warn!("No tool data in conversation, nothing to render");
            return Ok(UiAgentOutput::default());
        }

        let designed =
            futures::future::join_all(inputs.iter().map(|input| self.design(prompt, input))).await;

        let mut renditions = Vec::with_capacity(designed.len());
        for component in designed {
            let component = component?;
            renditions.push(Rendition {
                id: component.id().to_string(),
                component_system: renderer.component_system().to_string(),
                mime_type: renderer.mime_type().to_string(),
                content: renderer.render(&component)?,
            });
        }

        Ok(UiAgentOutput { renditions })
    }
}
