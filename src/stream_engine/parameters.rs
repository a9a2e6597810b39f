use anyhow::{Result, anyhow};
use minijinja::Environment;
use serde_json::{Map, Value};

use crate::node_registry::NodeType;
use crate::stream_engine::execution::ExecutionItem;
use crate::stream_engine::expressions;

/// Parameter values configured on a node, with the node description's defaults
/// filled in for anything the user left unset.
pub struct NodeParameters {
    values: Map<String, Value>,
    env: Environment<'static>,
}

impl NodeParameters {
    pub fn new(config: Value, node_type: &NodeType) -> Result<Self> {
        let mut values = match config {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => return Err(anyhow!("Node '{}' expects an object config, got {}", node_type.id, other)),
        };

        for prop in &node_type.properties {
            if let Some(default) = &prop.default {
                values.entry(prop.name.clone()).or_insert_with(|| Value::String(default.clone()));
            }
        }

        Ok(Self {
            values,
            env: expressions::create_environment(),
        })
    }

    /// Looks up `name` for the item at `item_index`. Expression strings are
    /// rendered against that item's payload; past the end of the batch they
    /// render against `null`.
    pub fn get_node_parameter(&self, name: &str, item_index: usize, items: &[ExecutionItem]) -> Result<Value> {
        let value = self.values.get(name)
            .ok_or_else(|| anyhow!("Could not get parameter '{}'", name))?;

        match value {
            Value::String(raw) if expressions::is_expression(raw) => {
                let context = items.get(item_index).map(|item| &item.json).unwrap_or(&Value::Null);
                let rendered = expressions::render(&self.env, raw, context)?;
                Ok(Value::String(rendered))
            }
            _ => Ok(value.clone()),
        }
    }

    pub fn get_string(&self, name: &str, item_index: usize, items: &[ExecutionItem]) -> Result<String> {
        let value = self.get_node_parameter(name, item_index, items)?;
        Ok(match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::perfectmind::description::node_description;
    use serde_json::json;

    #[test]
    fn test_defaults_fill_unset_parameters() {
        let params = NodeParameters::new(json!({ "startTime": "2020-01-01" }), &node_description()).unwrap();

        assert_eq!(params.get_string("resource", 0, &[]).unwrap(), "appointment");
        assert_eq!(params.get_string("operation", 0, &[]).unwrap(), "get");
        assert_eq!(params.get_string("recordsPerPage", 0, &[]).unwrap(), "100");
        assert_eq!(params.get_string("page", 0, &[]).unwrap(), "0");
        assert_eq!(params.get_string("startTime", 0, &[]).unwrap(), "2020-01-01");
        assert_eq!(params.get_string("endTime", 0, &[]).unwrap(), "");
    }

    #[test]
    fn test_numbers_are_rendered_as_plain_text() {
        let params = NodeParameters::new(json!({ "page": 3, "recordsPerPage": 25 }), &node_description()).unwrap();

        assert_eq!(params.get_string("page", 0, &[]).unwrap(), "3");
        assert_eq!(params.get_string("recordsPerPage", 0, &[]).unwrap(), "25");
    }

    #[test]
    fn test_unknown_parameter_is_an_error() {
        let params = NodeParameters::new(json!({}), &node_description()).unwrap();
        assert!(params.get_node_parameter("email", 0, &[]).is_err());
    }

    #[test]
    fn test_non_object_config_is_rejected() {
        assert!(NodeParameters::new(json!([1, 2]), &node_description()).is_err());
    }

    #[test]
    fn test_expressions_render_against_the_indexed_item() {
        let params = NodeParameters::new(json!({ "startTime": "{{ start }}" }), &node_description()).unwrap();
        let items = vec![
            ExecutionItem::new(json!({ "start": "2020-01-01" })),
            ExecutionItem::new(json!({ "start": "2021-06-01" })),
        ];

        assert_eq!(params.get_string("startTime", 0, &items).unwrap(), "2020-01-01");
        assert_eq!(params.get_string("startTime", 1, &items).unwrap(), "2021-06-01");
        assert_eq!(params.get_string("startTime", 5, &items).unwrap(), "");
    }
}
