use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record flowing into or out of a node. The payload lives under `json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExecutionItem {
    pub json: Value,
}

impl ExecutionItem {
    pub fn new(json: Value) -> Self {
        Self { json }
    }
}

impl From<Value> for ExecutionItem {
    fn from(json: Value) -> Self {
        Self { json }
    }
}

/// Wraps each collected value as its own output item.
pub fn return_json_array(data: Vec<Value>) -> Vec<ExecutionItem> {
    data.into_iter().map(ExecutionItem::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_return_json_array_keeps_arrays_intact() {
        let items = return_json_array(vec![json!([{"id": 1}]), json!(null)]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].json, json!([{"id": 1}]));
        assert_eq!(items[1].json, Value::Null);
        assert_eq!(serde_json::to_value(&items[0]).unwrap(), json!({"json": [{"id": 1}]}));
    }
}
