//! Twilio Models
//!
//! 認証情報とMessages APIのリクエスト/レスポンス

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

/// Contents of the Twilio credentials file
#[derive(Clone, Deserialize, Serialize)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
}

impl TwilioCredentials {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded.as_ref())
            .with_context(|| format!("Failed to read Twilio credentials: {}", path))?;
        let credentials: TwilioCredentials = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse Twilio credentials: {}", path))?;

        if credentials.account_sid.trim().is_empty() || credentials.auth_token.trim().is_empty() {
            anyhow::bail!("Twilio credentials must contain account_sid and auth_token");
        }

        Ok(credentials)
    }
}

// Keep the auth token out of logs
impl fmt::Debug for TwilioCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioCredentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"***")
            .finish()
    }
}

/// Form fields of a `Messages.json` create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRequest {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "MediaUrl")]
    pub media_url: String,
}

/// Message resource returned by Twilio
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}
