//! Drive Storage Repository Implementation
//!
//! PhotoStorageのGoogle Drive実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::adapter::auth::{create_drive_token_provider, CachedTokenProvider};
use crate::adapter::config::Config;
use crate::adapter::drive::client::{DriveApi, ReqwestDriveClient};
use crate::adapter::drive::models::{DriveFile, FileMetadata, PermissionRequest};
use crate::adapter::drive::query;
use crate::domain::entities::batch::{BatchFolder, BatchId};
use crate::domain::entities::photo::RemotePhoto;
use crate::domain::repositories::storage_repository::PhotoStorage;

/// Google Driveストレージリポジトリ
///
/// ルートフォルダ直下にバッチ番号名のフォルダを作り、その中に写真を置く
pub struct DriveStorageRepository {
    api: Arc<dyn DriveApi>,
    root_folder_id: String,
}

impl DriveStorageRepository {
    /// 新しいリポジトリを作成
    pub fn new(api: Arc<dyn DriveApi>, root_folder_id: impl Into<String>) -> Self {
        Self {
            api,
            root_folder_id: root_folder_id.into(),
        }
    }

    /// 設定の認証情報でDriveクライアントを組み立てる
    ///
    /// アクセストークンは `token_path` にキャッシュされる
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_drive_token_provider(&config.credentials_path)?;
        let tokens = CachedTokenProvider::new(
            provider,
            config.token_path.clone(),
            config.credentials_path.clone(),
        );
        let api: Arc<dyn DriveApi> = Arc::new(ReqwestDriveClient::new(tokens));
        Ok(Self::new(api, config.root_folder_id.clone()))
    }

    /// クエリに一致するファイルを全ページ分取得する
    async fn list_all(&self, q: &str) -> Result<Vec<DriveFile>> {
        let mut files = Vec::new();
        let mut page_token = None;

        loop {
            let page = self.api.list_files(q, page_token).await?;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl PhotoStorage for DriveStorageRepository {
    async fn find_batch_folder(&self, batch: BatchId) -> Result<Option<BatchFolder>> {
        let q = query::folder_by_name(&self.root_folder_id, &batch.folder_name());
        let folders = self
            .list_all(&q)
            .await
            .with_context(|| format!("Failed to search for folder of batch {}", batch))?;

        if folders.len() > 1 {
            warn!(
                "Found {} folders named '{}', using the first one",
                folders.len(),
                batch.folder_name()
            );
        }

        Ok(folders
            .into_iter()
            .next()
            .map(|folder| BatchFolder::new(folder.id, batch)))
    }

    async fn create_batch_folder(&self, batch: BatchId) -> Result<BatchFolder> {
        let metadata = FileMetadata::folder(&batch.folder_name(), &self.root_folder_id);
        let folder = self
            .api
            .create_file(&metadata)
            .await
            .with_context(|| format!("Failed to create folder for batch {}", batch))?;

        info!("Created folder {} for batch {}", folder.id, batch);
        Ok(BatchFolder::new(folder.id, batch))
    }

    async fn list_photos(&self, folder: &BatchFolder) -> Result<Vec<RemotePhoto>> {
        let files = self
            .list_all(&query::children_of(&folder.id))
            .await
            .with_context(|| format!("Failed to list files of batch {}", folder.batch))?;

        let photos: Vec<RemotePhoto> = files
            .into_iter()
            .filter(|file| !file.is_folder())
            .map(RemotePhoto::from)
            .collect();

        debug!("Batch {} has {} files", folder.batch, photos.len());
        Ok(photos)
    }

    async fn upload_photo(
        &self,
        folder: &BatchFolder,
        name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<RemotePhoto> {
        let metadata = FileMetadata::file(name, &folder.id);
        let file = self
            .api
            .upload_file(&metadata, mime_type, data)
            .await
            .with_context(|| format!("Failed to upload {}", name))?;

        Ok(file.into())
    }

    async fn replace_photo(
        &self,
        file_id: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<RemotePhoto> {
        let file = self
            .api
            .update_file_content(file_id, mime_type, data)
            .await
            .with_context(|| format!("Failed to replace file {}", file_id))?;

        Ok(file.into())
    }

    async fn share_folder(&self, folder: &BatchFolder) -> Result<()> {
        self.api
            .create_permission(&folder.id, &PermissionRequest::anyone_reader())
            .await
            .with_context(|| format!("Failed to share folder of batch {}", folder.batch))
    }
}
