//! Twilio Messaging Repository Implementation
//!
//! MessagingGatewayのTwilio実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::twilio::client::{ReqwestTwilioClient, TwilioApi};
use crate::adapter::twilio::models::{MessageRequest, TwilioCredentials};
use crate::domain::entities::destination::Destination;
use crate::domain::repositories::messaging_repository::MessagingGateway;

/// Twilioメッセージングリポジトリ
pub struct TwilioMessagingRepository {
    api: Arc<dyn TwilioApi>,
    /// 送信元アドレス（WhatsAppの場合は `whatsapp:` 付き）
    from: String,
}

impl TwilioMessagingRepository {
    /// 新しいリポジトリを作成
    pub fn new(api: Arc<dyn TwilioApi>, from: impl Into<String>) -> Self {
        Self {
            api,
            from: from.into(),
        }
    }

    /// 設定の認証情報ファイルからTwilioクライアントを組み立てる
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = TwilioCredentials::load(&config.twilio_credentials_path)?;
        let api: Arc<dyn TwilioApi> = Arc::new(ReqwestTwilioClient::new(credentials));
        Ok(Self::new(api, config.from_address()))
    }
}

#[async_trait]
impl MessagingGateway for TwilioMessagingRepository {
    async fn send_media(&self, to: &Destination, body: &str, media_url: &str) -> Result<String> {
        let request = MessageRequest {
            from: self.from.clone(),
            to: to.address(),
            body: body.to_string(),
            media_url: media_url.to_string(),
        };

        let response = self
            .api
            .create_message(&request)
            .await
            .with_context(|| format!("Failed to send message to {}", to))?;

        debug!(
            "Message {} queued with status {}",
            response.sid,
            response.status.as_deref().unwrap_or("unknown")
        );

        Ok(response.sid)
    }
}
