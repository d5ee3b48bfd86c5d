use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Failures of the generate pipeline, by stage
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("reasoning agent failed: {0:#}")]
    ReasoningAgent(anyhow::Error),

    #[error("UI agent failed: {0:#}")]
    UiAgent(anyhow::Error),

    #[error("UI agent returned no renditions")]
    NoRenditions,

    #[error("rendition content is not valid JSON: {0}")]
    InvalidRenditionJson(#[source] serde_json::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ReasoningAgent(_) => "reasoning_agent",
            AppError::UiAgent(_) => "ui_agent",
            AppError::NoRenditions => "no_renditions",
            AppError::InvalidRenditionJson(_) => "invalid_rendition_json",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Generate failed ({}): {}", self.kind(), self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": {
                    "kind": self.kind(),
                    "message": self.to_string(),
                }
            })),
        )
            .into_response()
    }
}
