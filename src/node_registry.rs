use serde::{Serialize, Deserialize};
use std::collections::HashMap;

/// Shows a property only while every named property holds one of the listed values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DisplayOptions {
    pub show: HashMap<String, Vec<String>>,
}

impl DisplayOptions {
    pub fn show_when(property: &str, values: &[&str]) -> Self {
        let mut show = HashMap::new();
        show.insert(property.to_string(), values.iter().map(|v| v.to_string()).collect());
        Self { show }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NodeProperty {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub property_type: String, // text, number, select, dateTime
    pub options: Option<Vec<String>>, // For select
    pub default: Option<String>,
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_options: Option<DisplayOptions>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NodeType {
    pub id: String,
    pub label: String,
    pub category: String,
    pub description: Option<String>,
    pub group: Vec<String>,
    pub version: u32,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub credentials: Vec<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub properties: Vec<NodeProperty>,
}

impl NodeType {
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

pub fn get_node_registry() -> Vec<NodeType> {
    crate::integrations::get_integration_node_definitions()
}
