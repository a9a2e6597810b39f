use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};

use crate::integration_registry::{CredentialProperty, IntegrationDefinition};

pub const CREDENTIAL_NAME: &str = "PerfectMindApi";
pub const DEFAULT_API_VERSION: &str = "2.0";

fn property(name: &str, label: &str, property_type: &str, default: &str, required: bool) -> CredentialProperty {
    CredentialProperty {
        name: name.to_string(),
        label: label.to_string(),
        property_type: property_type.to_string(),
        required,
        default: Some(default.to_string()),
        description: None,
    }
}

pub fn credential_definition() -> IntegrationDefinition {
    IntegrationDefinition {
        name: CREDENTIAL_NAME.to_string(),
        display_name: "PerfectMind API".to_string(),
        documentation_url: Some("PerfectMind".to_string()),
        description: "Access key and account login for the PerfectMind API".to_string(),
        credentials: vec![
            property("apiKey", "API Key", "text", "", true),
            property("apiVersion", "API Version", "text", DEFAULT_API_VERSION, false),
            property("clientNumber", "Client Number", "text", "", false),
            property("username", "Username", "text", "", false),
            property("password", "Password", "password", "", false),
            property("subDomain", "Sub Domain", "text", "", false),
        ],
    }
}

/// Resolved credential values for one node configuration.
///
/// Nothing here is validated: an empty API key only fails once the remote
/// service rejects the request.
#[derive(Debug)]
pub struct PerfectMindCredentials {
    pub api_key: SecretString,
    pub api_version: String,
    pub client_number: String,
    pub username: String,
    pub password: SecretString,
    pub sub_domain: String,
}

impl PerfectMindCredentials {
    /// Reads the bundle from the host's secrets map. Unset keys take their declared default.
    pub fn from_secrets(secrets: &HashMap<String, String>) -> Self {
        let definition = credential_definition();
        let field = |name: &str| -> String {
            secrets.get(name).cloned()
                .or_else(|| definition.property(name).and_then(|p| p.default.clone()))
                .unwrap_or_default()
        };

        Self {
            api_key: SecretString::new(field("apiKey")),
            api_version: field("apiVersion"),
            client_number: field("clientNumber"),
            username: field("username"),
            password: SecretString::new(field("password")),
            sub_domain: field("subDomain"),
        }
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_declared_defaults() {
        let mut secrets = HashMap::new();
        secrets.insert("apiKey".to_string(), "k".to_string());

        let creds = PerfectMindCredentials::from_secrets(&secrets);
        assert_eq!(creds.api_key(), "k");
        assert_eq!(creds.api_version, "2.0");
        assert_eq!(creds.client_number, "");
        assert_eq!(creds.password(), "");
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let mut secrets = HashMap::new();
        secrets.insert("apiKey".to_string(), "super-key".to_string());
        secrets.insert("password".to_string(), "hunter2".to_string());
        secrets.insert("username".to_string(), "u".to_string());

        let rendered = format!("{:?}", PerfectMindCredentials::from_secrets(&secrets));
        assert!(!rendered.contains("super-key"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("username: \"u\""));
    }

    #[test]
    fn test_only_api_key_is_required_and_only_password_is_masked() {
        let def = credential_definition();
        let required: Vec<_> = def.credentials.iter().filter(|p| p.required).map(|p| p.name.as_str()).collect();
        let secret: Vec<_> = def.credentials.iter().filter(|p| p.is_secret()).map(|p| p.name.as_str()).collect();

        assert_eq!(def.credentials.len(), 6);
        assert_eq!(required, vec!["apiKey"]);
        assert_eq!(secret, vec!["password"]);
    }
}
