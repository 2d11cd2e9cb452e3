//! # Send Photos Use Case
//!
//! バッチの写真を送信先へ送るユースケース

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use super::list_batch_photos::{BatchPhotos, ListBatchPhotosUseCase};
use crate::application::dto::send_config::SendConfig;
use crate::domain::entities::batch::BatchId;
use crate::domain::entities::destination::Destination;
use crate::domain::repositories::messaging_repository::MessagingGateway;
use crate::domain::repositories::storage_repository::PhotoStorage;

/// 送信結果のサマリー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSummary {
    /// バッチ番号
    pub batch: BatchId,
    /// 送信先
    pub destination: String,
    /// 送信した写真のファイル名
    pub photo_names: Vec<String>,
    /// プロバイダが発行したメッセージID（写真1枚につき1件）
    pub message_sids: Vec<String>,
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// バッチに写真がないため何も送信しなかった
    NoFilesFound { batch: BatchId },
    /// 送信した
    Sent(SendSummary),
}

/// 写真送信ユースケース
///
/// バッチフォルダの写真を列挙し、写真1枚につき1通のメッセージを送信する
pub struct SendPhotosUseCase<S: PhotoStorage, M: MessagingGateway> {
    storage: Arc<S>,
    list_use_case: ListBatchPhotosUseCase<S>,
    messaging: Arc<M>,
}

impl<S: PhotoStorage, M: MessagingGateway> SendPhotosUseCase<S, M> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `storage` - 写真ストレージ
    /// * `messaging` - メッセージングゲートウェイ
    pub fn new(storage: Arc<S>, messaging: Arc<M>) -> Self {
        Self {
            list_use_case: ListBatchPhotosUseCase::new(storage.clone()),
            storage,
            messaging,
        }
    }

    /// バッチの写真を送信する
    ///
    /// # Arguments
    ///
    /// * `batch` - バッチ番号
    /// * `destination` - 送信先
    /// * `config` - 送信設定
    ///
    /// # Errors
    ///
    /// ストレージまたはメッセージングの呼び出しに失敗した場合にエラーを返す
    pub async fn execute(
        &self,
        batch: BatchId,
        destination: &Destination,
        config: &SendConfig,
    ) -> Result<SendOutcome> {
        let (folder, photos) = match self.list_use_case.execute(batch).await? {
            BatchPhotos::NotFound => return Ok(SendOutcome::NoFilesFound { batch }),
            BatchPhotos::Found { folder, photos } => (folder, photos),
        };

        if config.share_folder {
            self.storage
                .share_folder(&folder)
                .await
                .with_context(|| format!("Failed to share folder for batch {}", batch))?;
        }

        let mut message_sids = Vec::with_capacity(photos.len());
        let mut photo_names = Vec::with_capacity(photos.len());

        for photo in &photos {
            let sid = self
                .messaging
                .send_media(destination, &config.message_body, &photo.download_url())
                .await
                .with_context(|| format!("Failed to send {} to {}", photo.name, destination))?;
            info!("Sent {} to {} (message {})", photo.name, destination, sid);
            message_sids.push(sid);
            photo_names.push(photo.name.clone());
        }

        Ok(SendOutcome::Sent(SendSummary {
            batch,
            destination: destination.to_string(),
            photo_names,
            message_sids,
        }))
    }
}
