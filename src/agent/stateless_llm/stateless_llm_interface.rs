use async_trait::async_trait;

use crate::agent::messages::Message;
use crate::agent::tools::ToolSpec;

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory, system prompts, or user messages
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Generate one assistant message for the given conversation.
    ///
    /// `messages` must already contain the system prompt, if any.
    /// When `tools` is non-empty the model may answer with tool calls
    /// instead of (or next to) text content.
    async fn chat_completion(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<Message, anyhow::Error>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}
