use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::agent_interface::ReasoningAgent;
use crate::agent::messages::{AgentState, Message, ToolCall};
use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::agent::tools::ToolRegistry;

/// Tool-calling agent: asks the model, runs the tools it requests,
/// feeds the results back, and stops once the model answers without tool calls.
pub struct ReactAgent {
    llm: Arc<dyn StatelessLLMInterface>,
    system: String,
    tools: ToolRegistry,
    max_iterations: usize,
}

impl ReactAgent {
    /// # Arguments
    /// * `llm` - The LLM to use
    /// * `system` - System prompt prepended to every model call
    /// * `tools` - Tools offered to the model
    /// * `max_iterations` - Upper bound on model calls per invocation
    pub fn new(
        llm: Arc<dyn StatelessLLMInterface>,
        system: String,
        tools: ToolRegistry,
        max_iterations: usize,
    ) -> Self {
        info!(
            "ReactAgent initialized with model {} and {} tools.",
            llm.model(),
            tools.len()
        );
        Self {
            llm,
            system,
            tools,
            max_iterations,
        }
    }

    fn to_messages(&self, state: &AgentState) -> Vec<Message> {
        let mut messages = Vec::with_capacity(state.messages.len() + 1);
        if !self.system.is_empty() {
            messages.push(Message::system(self.system.clone()));
        }
        messages.extend(state.messages.iter().cloned());
        messages
    }

    async fn run_tool(&self, call: &ToolCall) -> Message {
        debug!("Calling tool {} with {}", call.name, call.arguments);
        match self.tools.dispatch(call).await {
            Ok(result) => Message::tool(&call.id, &call.name, result.to_string()),
            Err(e) => {
                // The model gets the error text so it can recover
                warn!("Tool {} failed: {}", call.name, e);
                Message::tool(&call.id, &call.name, format!("Error: {}", e))
            }
        }
    }
}

#[async_trait]
impl ReasoningAgent for ReactAgent {
    async fn invoke(&self, mut state: AgentState) -> Result<AgentState, anyhow::Error> {
        let specs = self.tools.specs();

        for iteration in 0..self.max_iterations {
            let response = self
                .llm
                .chat_completion(&self.to_messages(&state), &specs)
                .await?;

            let tool_calls = response.tool_calls.clone();
            state.messages.push(response);

            if tool_calls.is_empty() {
                debug!("ReactAgent finished after {} model calls", iteration + 1);
                return Ok(state);
            }

            let results =
                futures::future::join_all(tool_calls.iter().map(|call| self.run_tool(call))).await;
            state.messages.extend(results);
        }

        Err(anyhow!(
            "Agent did not finish within {} iterations",
            self.max_iterations
        ))
    }
}
