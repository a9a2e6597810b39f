use serde::{Serialize, Deserialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CredentialProperty {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub property_type: String, // text, password
    pub required: bool,
    pub default: Option<String>,
    pub description: Option<String>,
}

impl CredentialProperty {
    pub fn is_secret(&self) -> bool {
        self.property_type == "password"
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IntegrationDefinition {
    pub name: String,
    pub display_name: String,
    pub documentation_url: Option<String>,
    pub description: String,
    pub credentials: Vec<CredentialProperty>,
}

impl IntegrationDefinition {
    pub fn property(&self, name: &str) -> Option<&CredentialProperty> {
        self.credentials.iter().find(|p| p.name == name)
    }
}
