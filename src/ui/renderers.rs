use anyhow::Result;

use super::components::UiComponent;

pub const JSON_COMPONENT_SYSTEM: &str = "json";

/// Component systems a renderer exists for
pub const COMPONENT_SYSTEMS: &[&str] = &[JSON_COMPONENT_SYSTEM];

/// Turns a component into the text of a rendition for one component system
pub trait ComponentRenderer: Send + Sync {
    fn component_system(&self) -> &str;

    fn mime_type(&self) -> &str;

    fn render(&self, component: &UiComponent) -> Result<String>;
}

/// Plain JSON output, consumed by the dynamic component renderer in the frontend
pub struct JsonRenderer;

impl ComponentRenderer for JsonRenderer {
    fn component_system(&self) -> &str {
        JSON_COMPONENT_SYSTEM
    }

    fn mime_type(&self) -> &str {
        "application/json"
    }

    fn render(&self, component: &UiComponent) -> Result<String> {
        Ok(serde_json::to_string(component)?)
    }
}
