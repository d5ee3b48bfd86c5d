use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use super::stateless_llm_interface::StatelessLLMInterface;
use crate::agent::messages::Message;
use crate::agent::tools::ToolSpec;

/// A mock LLM that returns pre-configured responses and records every request
pub struct MockLLM {
    responses: Mutex<Vec<Message>>,
    requests: Mutex<Vec<(Vec<Message>, Vec<ToolSpec>)>>,
}

impl MockLLM {
    /// Create a new mock LLM with a sequence of responses
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(Vec<Message>, Vec<ToolSpec>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatelessLLMInterface for MockLLM {
    async fn chat_completion(&self, messages: &[Message], tools: &[ToolSpec]) -> Result<Message> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), tools.to_vec()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Message::assistant(""))
        } else {
            Ok(responses.remove(0))
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
