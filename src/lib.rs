pub mod stream_engine;
pub mod integration_registry;
pub mod node_registry;
pub mod integrations;
pub mod cli;

pub use integrations::perfectmind::PerfectMindNode;
pub use stream_engine::{ExecutionItem, StreamNode};
