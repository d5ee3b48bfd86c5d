use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::stateless_llm_interface::StatelessLLMInterface;
use crate::agent::messages::{Message, Role, ToolCall};
use crate::agent::tools::ToolSpec;

/// OpenAI compatible LLM implementation.
/// Works against any `/chat/completions` endpoint (OpenAI, Ollama, Groq, ...).
pub struct OpenAICompatibleLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    temperature: Option<f32>,
}

impl OpenAICompatibleLLM {
    pub fn new(
        model: String,
        base_url: String,
        api_key: String,
        temperature: Option<f32>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model, base_url
        );
        Ok(Self {
            client,
            model,
            base_url,
            api_key,
            temperature,
        })
    }

    fn build_payload(&self, messages: &[Message], tools: &[ToolSpec]) -> Value {
        let mut payload = json!({
            "model": self.model,
            "messages": messages.iter().map(message_to_openai_spec).collect::<Vec<_>>(),
        });

        if !tools.is_empty() {
            payload["tools"] = json!(tools.iter().map(ToolSpec::to_openai_spec).collect::<Vec<_>>());
        }
        if let Some(temperature) = self.temperature {
            payload["temperature"] = json!(temperature);
        }
        payload
    }

    async fn post(&self, payload: &Value) -> Result<Value> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(anyhow!("LLM request to {} failed: {} {}", url, status, body))
            }
        }
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    async fn chat_completion(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<Message> {
        let payload = self.build_payload(messages, tools);
        debug!(
            "Sending {} messages ({} tools) to {}",
            messages.len(),
            tools.len(),
            self.model
        );

        let response = self.post(&payload).await?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("LLM API error: {}", error));
        }

        openai_response_to_message(&response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn message_to_openai_spec(message: &Message) -> Value {
    let mut converted = json!({
        "role": message.role,
        "content": message.content,
    });

    match message.role {
        Role::Assistant if message.has_tool_calls() => {
            if message.content.is_empty() {
                converted["content"] = Value::Null;
            }
            converted["tool_calls"] = message
                .tool_calls
                .iter()
                .map(|call| {
                    json!({
                        "id": call.id,
                        "type": "function",
                        "function": {
                            "name": call.name,
                            "arguments": call.arguments.to_string(),
                        }
                    })
                })
                .collect();
        }
        Role::Tool => {
            converted["tool_call_id"] = json!(message.tool_call_id);
            if let Some(name) = &message.name {
                converted["name"] = json!(name);
            }
        }
        _ => {}
    }

    converted
}

fn openai_response_to_message(response: &Value) -> Result<Message> {
    let original = response
        .pointer("/choices/0/message")
        .ok_or_else(|| anyhow!("No message in LLM response: {}", response))?;

    let content = original
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mut tool_calls = Vec::new();
    if let Some(calls) = original.get("tool_calls").and_then(Value::as_array) {
        for call in calls {
            let name = call
                .pointer("/function/name")
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow!("Tool call without function name: {}", call))?;

            let arguments = match call.pointer("/function/arguments") {
                Some(Value::String(raw)) if raw.trim().is_empty() => json!({}),
                Some(Value::String(raw)) => {
                    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
                }
                Some(other) => other.clone(),
                None => json!({}),
            };

            let id = call
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("call_{}", Uuid::new_v4().simple()));

            tool_calls.push(ToolCall {
                id,
                name: name.to_string(),
                arguments,
            });
        }
    }

    Ok(Message::assistant(content).with_tool_calls(tool_calls))
}
