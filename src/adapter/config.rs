//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::destination::Channel;
use crate::domain::services::conflict::ConflictPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "./boothsync.json";

/// Application configuration shared by both commands
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    // Google Drive
    /// Google credentials (service account or authorized user JSON)
    pub credentials_path: String,
    /// Cached access token generated on first authentication
    pub token_path: String,
    /// Drive folder that holds one sub-folder per batch
    pub root_folder_id: String,

    // Uploader
    pub state_path: String,
    pub conflict_policy: ConflictPolicy,
    /// Optional extension filter; empty uploads every non-hidden file
    pub photo_extensions: Vec<String>,

    // Sender
    pub twilio_credentials_path: String,
    pub from_number: String,
    pub default_country_code: String,
    pub use_whatsapp: bool,
    pub message_body: String,
    pub share_folder: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: "./credentials.json".to_string(),
            token_path: "./token.json".to_string(),
            root_folder_id: String::new(),
            state_path: "./.boothsync/upload-state.json".to_string(),
            conflict_policy: ConflictPolicy::Skip,
            photo_extensions: Vec::new(),
            twilio_credentials_path: "./twilio_creds.json".to_string(),
            from_number: "+14155238886".to_string(),
            default_country_code: "+65".to_string(),
            use_whatsapp: true,
            message_body: "Thank you for coming!".to_string(),
            share_folder: true,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.root_folder_id.trim().is_empty() {
            anyhow::bail!("root_folder_id must be set in the config file");
        }
        if let Some(bad) = self
            .photo_extensions
            .iter()
            .find(|ext| UploadConfig::normalize_extension(ext).is_empty())
        {
            anyhow::bail!("photo_extensions contains an empty entry: {:?}", bad);
        }
        Ok(())
    }

    pub fn channel(&self) -> Channel {
        if self.use_whatsapp {
            Channel::WhatsApp
        } else {
            Channel::Sms
        }
    }

    /// Sender address in the format the messaging provider expects
    pub fn from_address(&self) -> String {
        match self.channel() {
            Channel::WhatsApp => format!("whatsapp:{}", self.from_number),
            Channel::Sms => self.from_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let file = write_config(r#"{ "root_folder_id": "root-123" }"#);

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.root_folder_id, "root-123");
        assert_eq!(config.credentials_path, "./credentials.json");
        assert_eq!(config.token_path, "./token.json");
        assert_eq!(config.conflict_policy, ConflictPolicy::Skip);
        assert!(config.photo_extensions.is_empty());
        assert_eq!(config.default_country_code, "+65");
        assert!(config.use_whatsapp);
        assert_eq!(config.from_address(), "whatsapp:+14155238886");
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"{
  "credentials_path": "~/.boothsync/credentials.json",
  "token_path": "/tmp/token.json",
  "root_folder_id": "root-abc",
  "state_path": "/tmp/state.json",
  "conflict_policy": "rename",
  "photo_extensions": ["jpg"],
  "twilio_credentials_path": "/tmp/twilio.json",
  "from_number": "+15005550006",
  "default_country_code": "+1",
  "use_whatsapp": false,
  "message_body": "Here are your photos",
  "share_folder": false
}"#,
        );

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.conflict_policy, ConflictPolicy::Rename);
        assert_eq!(config.photo_extensions, vec!["jpg"]);
        assert_eq!(config.channel(), Channel::Sms);
        assert_eq!(config.from_address(), "+15005550006");
        assert_eq!(config.message_body, "Here are your photos");
        assert!(!config.share_folder);
    }

    #[test]
    fn test_load_requires_root_folder() {
        let file = write_config("{}");

        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();

        assert!(err.to_string().contains("root_folder_id"));
    }

    #[test]
    fn test_load_rejects_blank_extension() {
        let file = write_config(r#"{ "root_folder_id": "r", "photo_extensions": ["jpg", " "] }"#);

        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();

        assert!(err.to_string().contains("photo_extensions"));
    }

    #[test]
    fn test_load_rejects_dot_only_extension() {
        let file = write_config(r#"{ "root_folder_id": "r", "photo_extensions": ["."] }"#);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_accepts_empty_extension_list() {
        let file = write_config(r#"{ "root_folder_id": "r", "photo_extensions": [] }"#);

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert!(config.photo_extensions.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/boothsync.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_invalid_conflict_policy() {
        let file = write_config(r#"{ "root_folder_id": "r", "conflict_policy": "merge" }"#);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }
}
