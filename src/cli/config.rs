use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;

use crate::integrations::perfectmind::ApiEndpoint;

/// Settings for the `perfectmind` command. Credentials are never stored here.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_host: Option<String>,
    pub scheme: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Config::load_from(&Config::get_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Config::get_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn endpoint(&self) -> ApiEndpoint {
        let default = ApiEndpoint::default();
        ApiEndpoint {
            scheme: self.scheme.clone().unwrap_or(default.scheme),
            host: self.api_host.clone().unwrap_or(default.host),
        }
    }

    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }

    pub fn get_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "perfectmind-flow", "cli")
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint(), ApiEndpoint::default());
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            api_host: Some("perfectmind.test".to_string()),
            scheme: Some("http".to_string()),
            timeout_secs: Some(30),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.endpoint().host, "perfectmind.test");
        assert_eq!(loaded.endpoint().scheme, "http");
        assert!(loaded.build_client().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
