use anyhow::{anyhow, Result};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::components::ONE_CARD;
use super::ui_agent::InputData;
use crate::agent::messages::Message;
use crate::agent::stateless_llm::StatelessLLMInterface;

/// Model's choice of component and fields for one input data item
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentSelection {
    pub component: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSelection>,
    #[serde(default, alias = "reasonForTheComponentSelection")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldSelection {
    pub name: String,
    pub data_path: String,
}

fn system_prompt(allowed: &[&str]) -> String {
    format!(
        r#"You are helpful and advanced user interface design assistant. Based on the "User query" and JSON formatted "Data", select the best UI component to visualize the "Data" to the user.
Generate response in the JSON format only. Select one component only.
Provide the title for the component in "title".
Provide reason for the component selection in the "reasonForTheComponentSelection".
Select fields to be shown in the component based on the "User query" and "Data". Provide them in "fields", each with a short "name" and a "data_path" pointing to the value in the "Data" using JSONPath like "movie.title" or "movies[*].title".
Do not invent data paths that are not present in the "Data".

Available UI components:
* one-card - show details of one item, fields are shown as name/value pairs, an image URL field is shown as the card image
* image - show one image, use only when the user asks for an image or poster
* video-player - play a video, use only when the user asks for a trailer or video
* table - show a list of items with the same fields as rows, use when "Data" holds more than one item
* set-of-cards - show a list of items as cards, use when "Data" holds more than one item

Allowed components: {}

Response example:
{{
    "title": "Toy Story Details",
    "reasonForTheComponentSelection": "One movie is in the data",
    "component": "{}",
    "fields": [
        {{"name": "Title", "data_path": "movie.title"}},
        {{"name": "Year", "data_path": "movie.year"}},
        {{"name": "Poster", "data_path": "movie.posterUrl"}}
    ]
}}"#,
        allowed.join(", "),
        ONE_CARD,
    )
}

fn user_prompt(prompt: &str, input: &InputData) -> String {
    format!("=== User query ===\n{}\n\n=== Data ===\n{}", prompt, input.data)
}

/// Pull the JSON object out of a model answer that may be wrapped in
/// markdown fences or surrounded by prose.
pub fn extract_json_object(text: &str) -> Option<&str> {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("valid fence pattern")
    });

    let candidate = fence
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text);

    let rest = &candidate[candidate.find('{')?..];
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
    match stream.next() {
        Some(Ok(Value::Object(_))) => Some(&rest[..stream.byte_offset()]),
        _ => None,
    }
}

pub fn parse_selection(text: &str) -> Result<ComponentSelection> {
    let json = extract_json_object(text)
        .ok_or_else(|| anyhow!("No JSON object in component selection answer: {}", text))?;
    Ok(serde_json::from_str(json)?)
}

/// Ask the model to pick a component for `input`. A component outside
/// `allowed` is replaced by `one-card`.
pub async fn select_component(
    llm: &dyn StatelessLLMInterface,
    prompt: &str,
    input: &InputData,
    allowed: &[&str],
) -> Result<ComponentSelection> {
    let messages = [
        Message::system(system_prompt(allowed)),
        Message::user(user_prompt(prompt, input)),
    ];

    let answer = llm.chat_completion(&messages, &[]).await?;
    debug!("Component selection for {}: {}", input.id, answer.content);

    let mut selection = parse_selection(&answer.content)?;
    if let Some(reason) = &selection.reason {
        debug!("Selected {} because: {}", selection.component, reason);
    }
    if !allowed.contains(&selection.component.as_str()) {
        warn!(
            "Model selected component '{}' which is not allowed, using {}",
            selection.component, ONE_CARD
        );
        selection.component = ONE_CARD.to_string();
    }
    Ok(selection)
}
