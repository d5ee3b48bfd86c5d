pub mod agent_interface;
pub mod react_agent;

pub use agent_interface::*;
pub use react_agent::*;
