//! # Upload Photos Use Case
//!
//! 写真アップロードユースケース

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::batch::{BatchFolder, BatchId};
use crate::domain::entities::photo::LocalPhoto;
use crate::domain::repositories::photo_repository::PhotoRepository;
use crate::domain::repositories::state_repository::StateRepository;
use crate::domain::repositories::storage_repository::PhotoStorage;
use crate::domain::services::conflict::{ConflictResolver, UploadAction};

/// アップロード結果のサマリー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    /// バッチ番号
    pub batch: BatchId,
    /// バッチフォルダID（写真が0件の場合は `None`）
    pub folder_id: Option<String>,
    /// このアップロードでバッチフォルダを作成したかどうか
    pub folder_created: bool,
    /// 新規アップロードしたファイル名
    pub uploaded: Vec<String>,
    /// 別名でアップロードしたファイル（元の名前, リモートの名前）
    pub renamed: Vec<(String, String)>,
    /// 内容を置き換えたファイル名
    pub overwritten: Vec<String>,
    /// 既に存在したためスキップしたファイル名
    pub skipped: Vec<String>,
}

impl UploadSummary {
    fn empty(batch: BatchId) -> Self {
        Self {
            batch,
            folder_id: None,
            folder_created: false,
            uploaded: Vec::new(),
            renamed: Vec::new(),
            overwritten: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// リモートに書き込んだファイル数
    pub fn written_count(&self) -> usize {
        self.uploaded.len() + self.renamed.len() + self.overwritten.len()
    }

    /// リモートに書き込んだファイル名（リモートでの名前）
    pub fn written_names(&self) -> Vec<String> {
        self.uploaded
            .iter()
            .cloned()
            .chain(self.renamed.iter().map(|(_, remote)| remote.clone()))
            .chain(self.overwritten.iter().cloned())
            .collect()
    }
}

/// 写真アップロードユースケース
///
/// バッチフォルダを作成（または再利用）して写真をアップロードし、状態を更新する
pub struct UploadPhotosUseCase<P: PhotoRepository, S: PhotoStorage, T: StateRepository> {
    photo_repository: Arc<P>,
    storage: Arc<S>,
    state_repository: Arc<T>,
}

impl<P: PhotoRepository, S: PhotoStorage, T: StateRepository> UploadPhotosUseCase<P, S, T> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `photo_repository` - 写真リポジトリ
    /// * `storage` - 写真ストレージ
    /// * `state_repository` - 状態リポジトリ
    pub fn new(photo_repository: Arc<P>, storage: Arc<S>, state_repository: Arc<T>) -> Self {
        Self {
            photo_repository,
            storage,
            state_repository,
        }
    }

    /// 写真をアップロードして状態を更新
    ///
    /// # Arguments
    ///
    /// * `photos` - アップロードする写真
    /// * `batch` - バッチ番号
    /// * `config` - アップロード設定
    /// * `state_path` - 状態ファイルのパス
    ///
    /// # Returns
    ///
    /// アップロード結果のサマリー
    ///
    /// # Errors
    ///
    /// ストレージ操作に失敗した場合はその時点で中断してエラーを返す。
    /// それまでに書き込んだファイルは状態に記録される
    pub async fn execute(
        &self,
        photos: &[LocalPhoto],
        batch: BatchId,
        config: &UploadConfig,
        state_path: &str,
    ) -> Result<UploadSummary> {
        let mut summary = UploadSummary::empty(batch);
        if photos.is_empty() {
            return Ok(summary);
        }

        let folder = match self.storage.find_batch_folder(batch).await? {
            Some(folder) => {
                info!("Reusing folder {} for batch {}", folder.id, batch);
                folder
            }
            None => {
                let folder = self.storage.create_batch_folder(batch).await?;
                info!("Created folder {} for batch {}", folder.id, batch);
                summary.folder_created = true;
                folder
            }
        };
        summary.folder_id = Some(folder.id.clone());

        let mut existing: HashMap<String, String> = self
            .storage
            .list_photos(&folder)
            .await?
            .into_iter()
            .map(|photo| (photo.name, photo.id))
            .collect();

        let result = self
            .upload_all(photos, &folder, config, &mut existing, &mut summary)
            .await;

        if summary.written_count() > 0 {
            if let Err(save_err) = self.save_state(&summary, &folder, state_path).await {
                if result.is_err() {
                    warn!("Failed to save upload state: {:#}", save_err);
                } else {
                    return Err(save_err);
                }
            }
        }

        result?;
        Ok(summary)
    }

    async fn upload_all(
        &self,
        photos: &[LocalPhoto],
        folder: &BatchFolder,
        config: &UploadConfig,
        existing: &mut HashMap<String, String>,
        summary: &mut UploadSummary,
    ) -> Result<()> {
        for photo in photos {
            let action =
                ConflictResolver::resolve(&photo.file_name, existing, config.conflict_policy);

            match action {
                UploadAction::Skip { name } => {
                    info!("Skipping {}: already in batch {}", name, folder.batch);
                    summary.skipped.push(name);
                }
                UploadAction::Create { name } => {
                    let data = self.photo_repository.read_photo(photo).await?;
                    let remote = self
                        .storage
                        .upload_photo(folder, &name, &photo.mime_type, data)
                        .await
                        .with_context(|| format!("Failed to upload {}", photo.path.display()))?;
                    info!("Uploaded {} as file {}", name, remote.id);
                    existing.insert(name.clone(), remote.id);
                    summary.uploaded.push(name);
                }
                UploadAction::Rename { name } => {
                    let data = self.photo_repository.read_photo(photo).await?;
                    let remote = self
                        .storage
                        .upload_photo(folder, &name, &photo.mime_type, data)
                        .await
                        .with_context(|| format!("Failed to upload {}", photo.path.display()))?;
                    info!("Uploaded {} as {} (file {})", photo.file_name, name, remote.id);
                    existing.insert(name.clone(), remote.id);
                    summary.renamed.push((photo.file_name.clone(), name));
                }
                UploadAction::Replace { file_id, name } => {
                    let data = self.photo_repository.read_photo(photo).await?;
                    self.storage
                        .replace_photo(&file_id, &photo.mime_type, data)
                        .await
                        .with_context(|| format!("Failed to overwrite {}", name))?;
                    info!("Overwrote {} (file {})", name, file_id);
                    summary.overwritten.push(name);
                }
            }
        }

        Ok(())
    }

    async fn save_state(
        &self,
        summary: &UploadSummary,
        folder: &BatchFolder,
        state_path: &str,
    ) -> Result<()> {
        let mut state = self.state_repository.load(state_path).await?;
        let hostname = hostname::get()
            .ok()
            .map(|h| h.to_string_lossy().to_string());

        state.record_upload(
            summary.batch,
            &folder.id,
            summary.written_names(),
            hostname,
            Utc::now().to_rfc3339(),
        );

        self.state_repository.save(state_path, &state).await
    }
}
