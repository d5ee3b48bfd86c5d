use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::agent::AgentState;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// `POST /generate`: prompt -> reasoning agent -> UI agent -> first rendition as JSON
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn generate_response(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = request.prompt.unwrap_or_default();
    info!("Prompt === {}", prompt);

    let content = if prompt.is_empty() {
        state.config.agent_config.fallback_prompt.clone()
    } else {
        prompt
    };

    // Step 1: movies agent
    let agent_response = state
        .reasoning_agent
        .invoke(AgentState::from_prompt(content))
        .await
        .map_err(AppError::ReasoningAgent)?;

    // Step 2: UI agent
    let ui_response = state
        .ui_agent
        .invoke(&agent_response, &state.ui_render_config)
        .await
        .map_err(AppError::UiAgent)?;

    // Step 3: first rendition becomes the response
    let rendition = ui_response
        .renditions
        .first()
        .ok_or(AppError::NoRenditions)?;
    info!("{}", rendition.content);

    let response: Value =
        serde_json::from_str(&rendition.content).map_err(AppError::InvalidRenditionJson)?;

    Ok(Json(json!({ "response": response })))
}
