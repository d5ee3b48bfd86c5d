use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One labelled column of values pulled out of the input data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    pub name: String,
    pub data_path: String,
    #[serde(default)]
    pub data: Vec<Value>,
}

/// UI component description, serialised in the shape the frontend renderer expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "kebab-case")]
pub enum UiComponent {
    OneCard {
        id: String,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        fields: Vec<DataField>,
    },
    Image {
        id: String,
        title: String,
        image: Option<String>,
    },
    VideoPlayer {
        id: String,
        title: String,
        video: Option<String>,
        video_img: Option<String>,
    },
    Table {
        id: String,
        title: String,
        fields: Vec<DataField>,
    },
    SetOfCards {
        id: String,
        title: String,
        fields: Vec<DataField>,
    },
}

impl UiComponent {
    pub fn id(&self) -> &str {
        match self {
            UiComponent::OneCard { id, .. }
            | UiComponent::Image { id, .. }
            | UiComponent::VideoPlayer { id, .. }
            | UiComponent::Table { id, .. }
            | UiComponent::SetOfCards { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UiComponent::OneCard { .. } => ONE_CARD,
            UiComponent::Image { .. } => IMAGE,
            UiComponent::VideoPlayer { .. } => VIDEO_PLAYER,
            UiComponent::Table { .. } => TABLE,
            UiComponent::SetOfCards { .. } => SET_OF_CARDS,
        }
    }
}

pub const ONE_CARD: &str = "one-card";
pub const IMAGE: &str = "image";
pub const VIDEO_PLAYER: &str = "video-player";
pub const TABLE: &str = "table";
pub const SET_OF_CARDS: &str = "set-of-cards";

/// Components available for single-item data
pub const SUPPORTED_COMPONENTS: &[&str] = &[ONE_CARD, IMAGE, VIDEO_PLAYER];

/// Multi-item components, only offered when enabled in config
pub const UNSUPPORTED_COMPONENTS: &[&str] = &[TABLE, SET_OF_CARDS];
