use std::collections::HashMap;

use anyhow::Result;
use serde_json::Value;

use crate::integration_registry::IntegrationDefinition;
use crate::node_registry::NodeType;
use crate::stream_engine::StreamNode;

pub mod perfectmind;

/// Builds the node registered under `integration`/`node`, or `None` if nothing is.
pub fn create_integration_node(
    integration: &str,
    node: &str,
    config: Value,
    secrets: &HashMap<String, String>,
) -> Result<Option<Box<dyn StreamNode>>> {
    match (integration, node) {
        (perfectmind::INTEGRATION_NAME, perfectmind::NODE_NAME) => {
            Ok(Some(Box::new(perfectmind::PerfectMindNode::from_config(config, secrets)?)))
        }
        _ => Ok(None),
    }
}

pub fn get_integration_definitions() -> Vec<IntegrationDefinition> {
    vec![perfectmind::credential_definition()]
}

pub fn get_integration_node_definitions() -> Vec<NodeType> {
    vec![perfectmind::node_description()]
}
