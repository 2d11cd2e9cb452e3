//! # Messaging Gateway Trait
//!
//! メディアメッセージ送信を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::destination::Destination;

/// メッセージングゲートウェイ
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// メディア付きメッセージを送信する
    ///
    /// # Arguments
    ///
    /// * `to` - 送信先
    /// * `body` - 本文
    /// * `media_url` - 添付するメディアのURL
    ///
    /// # Returns
    ///
    /// プロバイダが発行したメッセージID
    async fn send_media(&self, to: &Destination, body: &str, media_url: &str) -> Result<String>;
}
