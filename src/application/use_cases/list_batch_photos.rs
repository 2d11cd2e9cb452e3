//! # List Batch Photos Use Case
//!
//! バッチに属するリモート写真の列挙ユースケース

use anyhow::Result;
use std::sync::Arc;

use crate::domain::entities::batch::{BatchFolder, BatchId};
use crate::domain::entities::photo::RemotePhoto;
use crate::domain::repositories::storage_repository::PhotoStorage;

/// バッチの写真
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchPhotos {
    /// バッチフォルダが存在しない、またはフォルダが空
    NotFound,
    /// バッチフォルダと写真
    Found {
        folder: BatchFolder,
        photos: Vec<RemotePhoto>,
    },
}

/// バッチ写真列挙ユースケース
pub struct ListBatchPhotosUseCase<S: PhotoStorage> {
    storage: Arc<S>,
}

impl<S: PhotoStorage> ListBatchPhotosUseCase<S> {
    /// 新しいユースケースを作成
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// バッチの写真を列挙する
    ///
    /// フォルダが見つからない場合も写真が0件の場合も `BatchPhotos::NotFound` を返す
    pub async fn execute(&self, batch: BatchId) -> Result<BatchPhotos> {
        let Some(folder) = self.storage.find_batch_folder(batch).await? else {
            return Ok(BatchPhotos::NotFound);
        };

        let photos = self.storage.list_photos(&folder).await?;
        if photos.is_empty() {
            return Ok(BatchPhotos::NotFound);
        }

        Ok(BatchPhotos::Found { folder, photos })
    }
}
