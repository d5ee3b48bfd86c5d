use async_trait::async_trait;

use crate::agent::messages::AgentState;

/// Conversational agent that extends a conversation, possibly calling tools.
///
/// One instance is shared by all requests, so implementations must be
/// safe to invoke concurrently and must not keep per-request state.
#[async_trait]
pub trait ReasoningAgent: Send + Sync {
    /// Run the agent on `state` and return the extended conversation.
    ///
    /// The returned state holds the input messages followed by everything
    /// the agent produced (assistant turns and tool results).
    async fn invoke(&self, state: AgentState) -> Result<AgentState, anyhow::Error>;
}
