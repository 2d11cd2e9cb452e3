//! # Photo Storage Trait
//!
//! リモートストレージ（バッチフォルダと写真）の操作を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::batch::{BatchFolder, BatchId};
use crate::domain::entities::photo::RemotePhoto;

/// 写真ストレージ
///
/// バッチ番号をフォルダ名とするリモートストレージ
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// バッチフォルダを検索する
    ///
    /// # Returns
    ///
    /// 見つからない場合は `None`
    async fn find_batch_folder(&self, batch: BatchId) -> Result<Option<BatchFolder>>;

    /// バッチフォルダを作成する
    async fn create_batch_folder(&self, batch: BatchId) -> Result<BatchFolder>;

    /// バッチフォルダ内の写真を列挙する（サブフォルダは含まない）
    async fn list_photos(&self, folder: &BatchFolder) -> Result<Vec<RemotePhoto>>;

    /// 写真を新規アップロードする
    ///
    /// # Arguments
    ///
    /// * `folder` - アップロード先のバッチフォルダ
    /// * `name` - リモートでのファイル名
    /// * `mime_type` - MIMEタイプ
    /// * `data` - ファイル内容
    async fn upload_photo(
        &self,
        folder: &BatchFolder,
        name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<RemotePhoto>;

    /// 既存の写真の内容を置き換える
    async fn replace_photo(&self, file_id: &str, mime_type: &str, data: Vec<u8>)
        -> Result<RemotePhoto>;

    /// バッチフォルダをリンクを知っている全員に読み取り公開する
    async fn share_folder(&self, folder: &BatchFolder) -> Result<()>;
}
