pub mod messages;
pub mod agent_factory;
pub mod stateless_llm_factory;

pub mod agents;
pub mod stateless_llm;
pub mod tools;

pub use messages::*;
pub use agent_factory::*;
pub use stateless_llm_factory::*;
pub use agents::*;
pub use stateless_llm::*;
pub use tools::*;
