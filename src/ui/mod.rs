pub mod ui_agent;
pub mod components;
pub mod data_path;
pub mod component_selection;
pub mod data_transformation;
pub mod renderers;
pub mod next_gen_ui_agent;

pub use ui_agent::*;
pub use components::*;
pub use renderers::*;
pub use next_gen_ui_agent::*;
