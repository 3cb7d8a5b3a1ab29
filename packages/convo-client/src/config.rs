//! Client configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use convo_core::{Participant, SenderRole};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;

/// Errors from loading or saving the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Client configuration, stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the conversation backend
    pub base_url: String,
    /// Opaque bearer token, if the backend requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Identifier of the local party
    pub sender_id: String,
    /// The local party's role in its conversations
    pub sender_role: SenderRole,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4000".to_string(),
            auth_token: None,
            sender_id: String::new(),
            sender_role: SenderRole::Initiator,
        }
    }
}

impl ClientConfig {
    /// Get the default config file path.
    ///
    /// Default path: `~/.convo/config.toml`.
    /// Can be overridden with the `CONVO_CONFIG_FILE` environment
    /// variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("CONVO_CONFIG_FILE") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".convo/config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Load from the default path, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save to a specific path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The local participant identity used for optimistic placeholders.
    pub fn local_participant(&self) -> Participant {
        Participant::new(&self.sender_id, self.sender_role)
    }

    /// Build an API client from this configuration.
    pub fn api_client(&self) -> ApiClient {
        let client = ApiClient::new(&self.base_url);
        match &self.auth_token {
            Some(token) => client.with_auth_token(token.clone()),
            None => client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = ClientConfig {
            base_url: "https://api.example.com".to_string(),
            auth_token: Some("tok".to_string()),
            sender_id: "u1".to_string(),
            sender_role: SenderRole::Counterparty,
        };
        config.save_to(&path).unwrap();

        let loaded = ClientConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/convo/config.toml");

        ClientConfig::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_local_participant() {
        let config = ClientConfig {
            sender_id: "u7".to_string(),
            sender_role: SenderRole::Initiator,
            ..Default::default()
        };
        let participant = config.local_participant();
        assert_eq!(participant.id, "u7");
        assert_eq!(participant.role, SenderRole::Initiator);
    }
}
