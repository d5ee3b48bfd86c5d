use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::agent::messages::AgentState;

/// Selects the output format of the UI agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiRenderConfig {
    pub component_system: String,
}

impl UiRenderConfig {
    pub fn new(component_system: impl Into<String>) -> Self {
        Self {
            component_system: component_system.into(),
        }
    }
}

impl Default for UiRenderConfig {
    fn default() -> Self {
        Self::new("json")
    }
}

/// One backend data item the UI agent visualises, usually a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    pub id: String,
    /// Raw data, normally JSON text
    pub data: String,
}

/// A serialised UI description produced for one input data item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendition {
    pub id: String,
    pub component_system: String,
    pub mime_type: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiAgentOutput {
    pub renditions: Vec<Rendition>,
}

/// Agent turning a reasoning agent's conversation into UI renditions.
///
/// Shared by all requests; implementations must tolerate concurrent calls.
#[async_trait]
pub trait UiAgent: Send + Sync {
    async fn invoke(
        &self,
        state: &AgentState,
        config: &UiRenderConfig,
    ) -> Result<UiAgentOutput, anyhow::Error>;
}
