//! Twilio Client Abstractions
//!
//! クライアントの抽象化と reqwest 実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

#[cfg(test)]
use mockall::automock;

use super::models::{MessageRequest, MessageResponse, TwilioCredentials};
use crate::adapter::http_error::ensure_success;

pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

const SERVICE: &str = "Twilio";

/// Trait for Twilio message creation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TwilioApi: Send + Sync {
    async fn create_message(&self, request: &MessageRequest) -> Result<MessageResponse>;
}

/// Twilio REST client using HTTP basic auth
pub struct ReqwestTwilioClient {
    http: Client,
    credentials: TwilioCredentials,
    api_base: String,
}

impl ReqwestTwilioClient {
    pub fn new(credentials: TwilioCredentials) -> Self {
        Self::with_base_url(credentials, TWILIO_API_BASE)
    }

    pub fn with_base_url(credentials: TwilioCredentials, api_base: &str) -> Self {
        Self {
            http: Client::new(),
            credentials,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.credentials.account_sid
        )
    }
}

#[async_trait]
impl TwilioApi for ReqwestTwilioClient {
    async fn create_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(
                &self.credentials.account_sid,
                Some(&self.credentials.auth_token),
            )
            .form(request)
            .send()
            .await
            .context("Twilio request failed")?;
        let response = ensure_success(SERVICE, response).await?;

        response
            .json::<MessageResponse>()
            .await
            .context("Failed to parse Twilio message response")
    }
}
