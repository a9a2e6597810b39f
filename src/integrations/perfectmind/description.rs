use crate::node_registry::{DisplayOptions, NodeProperty, NodeType};

use super::credentials::CREDENTIAL_NAME;
use super::NODE_ID;

fn shown_for_resources() -> Option<DisplayOptions> {
    Some(DisplayOptions::show_when("resource", &["contact", "appointment"]))
}

fn select(name: &str, label: &str, options: &[&str], default: &str) -> NodeProperty {
    NodeProperty {
        name: name.to_string(),
        label: label.to_string(),
        property_type: "select".to_string(),
        options: Some(options.iter().map(|o| o.to_string()).collect()),
        default: Some(default.to_string()),
        required: false,
        description: None,
        display_options: None,
    }
}

fn field(name: &str, label: &str, property_type: &str, default: &str) -> NodeProperty {
    NodeProperty {
        name: name.to_string(),
        label: label.to_string(),
        property_type: property_type.to_string(),
        options: None,
        default: Some(default.to_string()),
        required: false,
        description: None,
        display_options: shown_for_resources(),
    }
}

pub fn node_description() -> NodeType {
    NodeType {
        id: NODE_ID.to_string(),
        label: "PerfectMind".to_string(),
        category: "Integration".to_string(),
        description: Some("Connect to PerfectMind's API".to_string()),
        group: vec!["transform".to_string()],
        version: 1,
        icon: Some("file:PerfectMind.png".to_string()),
        color: Some("#003594".to_string()),
        credentials: vec![CREDENTIAL_NAME.to_string()],
        inputs: vec!["main".to_string()],
        outputs: vec!["main".to_string()],
        properties: vec![
            NodeProperty {
                required: true,
                description: Some("Contacts in PerfectMind".to_string()),
                ..select("resource", "Resource", &["contact", "appointment"], "appointment")
            },
            NodeProperty {
                description: Some("The default operation to perform.".to_string()),
                display_options: shown_for_resources(),
                ..select("operation", "Operation", &["create", "update", "get"], "get")
            },
            field("recordsPerPage", "Records Per Page", "text", "100"),
            field("page", "Page", "number", "0"),
            NodeProperty {
                required: true,
                ..field("startTime", "Start Date/Time", "dateTime", "")
            },
            NodeProperty {
                required: true,
                ..field("endTime", "End Date/Time", "dateTime", "")
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_and_range_follow_resource() {
        let node = node_description();

        for name in ["operation", "recordsPerPage", "page", "startTime", "endTime"] {
            let prop = node.property(name).unwrap();
            let display = prop.display_options.as_ref().unwrap();
            assert_eq!(display.show["resource"], vec!["contact", "appointment"]);
        }
        assert!(node.property("resource").unwrap().display_options.is_none());
    }

    #[test]
    fn test_date_range_is_required() {
        let node = node_description();
        assert!(node.property("startTime").unwrap().required);
        assert!(node.property("endTime").unwrap().required);
        assert!(!node.property("page").unwrap().required);
    }
}
