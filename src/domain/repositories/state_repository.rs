//! # State Repository Trait
//!
//! アップロード状態の永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::batch::BatchId;

/// バッチごとのアップロード記録
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BatchRecord {
    /// リモートのバッチフォルダID
    pub folder_id: String,
    /// アップロード済みのファイル名
    pub uploaded_files: BTreeSet<String>,
    /// アップロードしたホスト名
    pub hostname: Option<String>,
    /// 最後のアップロードタイムスタンプ
    pub last_upload_timestamp: Option<String>,
}

/// アップロード状態
///
/// 最後に使用したバッチ番号と、バッチごとのアップロード記録を保持する
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadState {
    /// 最後に使用したバッチ番号（未使用なら0）
    pub last_batch: u32,
    /// バッチ番号ごとの記録
    pub batches: BTreeMap<u32, BatchRecord>,
    /// アップロード総数
    pub total_uploaded: u64,
    /// 最後のアップロードタイムスタンプ
    pub last_upload_timestamp: Option<String>,
}

impl UploadState {
    /// 新しいアップロード状態を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 次に割り当てるバッチ番号を返す
    ///
    /// # 例
    ///
    /// ```
    /// use boothsync::domain::repositories::state_repository::UploadState;
    ///
    /// let mut state = UploadState::new();
    /// assert_eq!(state.next_batch().value(), 1);
    ///
    /// state.last_batch = 7;
    /// assert_eq!(state.next_batch().value(), 8);
    /// ```
    pub fn next_batch(&self) -> BatchId {
        BatchId::new(self.last_batch)
            .map(|b| b.next())
            .unwrap_or(BatchId::FIRST)
    }

    /// ファイル名がバッチにアップロード済みかどうかを確認
    pub fn is_uploaded(&self, batch: BatchId, file_name: &str) -> bool {
        self.batches
            .get(&batch.value())
            .is_some_and(|record| record.uploaded_files.contains(file_name))
    }

    /// アップロード済みファイルを記録する
    ///
    /// `last_batch` はこれまでの最大値を保つ
    pub fn record_upload(
        &mut self,
        batch: BatchId,
        folder_id: &str,
        file_names: Vec<String>,
        hostname: Option<String>,
        timestamp: String,
    ) {
        let count = file_names.len() as u64;
        let record = self.batches.entry(batch.value()).or_default();

        record.folder_id = folder_id.to_string();
        record.uploaded_files.extend(file_names);
        record.hostname = hostname;
        record.last_upload_timestamp = Some(timestamp.clone());

        self.last_batch = self.last_batch.max(batch.value());
        self.total_uploaded += count;
        self.last_upload_timestamp = Some(timestamp);
    }
}

/// 状態リポジトリ
///
/// アップロード状態の永続化を担当するリポジトリ
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// 状態を読み込む
    ///
    /// # Arguments
    ///
    /// * `path` - 状態ファイルのパス
    ///
    /// # Returns
    ///
    /// アップロード状態（ファイルが存在しない場合は空の状態）
    ///
    /// # Errors
    ///
    /// ファイルの読み込みに失敗した場合にエラーを返す
    async fn load(&self, path: &str) -> Result<UploadState>;

    /// 状態を保存する
    ///
    /// # Arguments
    ///
    /// * `path` - 状態ファイルのパス
    /// * `state` - 保存するアップロード状態
    ///
    /// # Errors
    ///
    /// ファイルの書き込みに失敗した場合にエラーを返す
    async fn save(&self, path: &str, state: &UploadState) -> Result<()>;
}
