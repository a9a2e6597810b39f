use perfectmind_flow::integrations::get_integration_definitions;
use perfectmind_flow::node_registry::get_node_registry;

fn main() {
    println!("# PerfectMind Node Reference\n");
    println!("This document is auto-generated. Do not edit manually.\n");

    for node in get_node_registry() {
        println!("## {}\n", node.label);
        println!("**ID**: `{}`  **Version**: {}\n", node.id, node.version);

        if let Some(desc) = &node.description {
            println!("{}\n", desc);
        }
        if !node.credentials.is_empty() {
            println!("**Credentials**: {}\n", node.credentials.join(", "));
        }

        println!("### Properties\n");
        println!("| Name | Type | Required | Default | Options | Shown when |");
        println!("|------|------|----------|---------|---------|------------|");
        for prop in &node.properties {
            let required = if prop.required { "Yes" } else { "No" };
            let default = prop.default.as_deref().filter(|d| !d.is_empty()).unwrap_or("-");
            let options = prop.options.as_ref().map(|o| o.join(", ")).unwrap_or_else(|| "-".to_string());
            let shown = match &prop.display_options {
                Some(display) => {
                    let mut conditions: Vec<String> = display.show.iter()
                        .map(|(name, values)| format!("{} in [{}]", name, values.join(", ")))
                        .collect();
                    conditions.sort();
                    conditions.join("; ")
                }
                None => "always".to_string(),
            };
            println!("| `{}` | `{}` | {} | `{}` | {} | {} |",
                prop.name,
                prop.property_type,
                required,
                default,
                options,
                shown
            );
        }
        println!();
    }

    for integration in get_integration_definitions() {
        println!("## Credential: {}\n", integration.display_name);
        println!("**Name**: `{}`\n", integration.name);
        println!("{}\n", integration.description);
        println!("| Field | Label | Type | Required | Default |");
        println!("|-------|-------|------|----------|---------|");
        for prop in &integration.credentials {
            let required = if prop.required { "Yes" } else { "No" };
            let default = prop.default.as_deref().filter(|d| !d.is_empty()).unwrap_or("-");
            println!("| `{}` | {} | `{}` | {} | `{}` |", prop.name, prop.label, prop.property_type, required, default);
        }
        println!();
    }
}
