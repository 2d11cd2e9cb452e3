//! JSON State Repository Implementation
//!
//! StateRepositoryのJSON実装（アップロード状態をJSONファイルで永続化）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::PathBuf;

use crate::domain::repositories::state_repository::{StateRepository, UploadState};

/// JSONファイルベースの状態リポジトリ
pub struct JsonStateRepository;

impl JsonStateRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    fn resolve(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).as_ref())
    }

    /// ファイルから状態を読み込む（同期処理）
    fn load_sync(path: &str) -> Result<UploadState> {
        let path = Self::resolve(path);

        if !path.exists() {
            info!("No existing upload state found, starting from batch 1");
            return Ok(UploadState::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read upload state file: {}", path.display()))?;

        let state: UploadState =
            serde_json::from_str(&content).context("Failed to parse upload state JSON")?;

        info!(
            "Loaded upload state: last batch {}, {} photos previously uploaded",
            state.last_batch, state.total_uploaded
        );

        Ok(state)
    }

    /// ファイルに状態を保存する（同期処理）
    fn save_sync(path: &str, state: &UploadState) -> Result<()> {
        let path = Self::resolve(path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create state directory")?;
        }

        let json =
            serde_json::to_string_pretty(state).context("Failed to serialize upload state")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write upload state file: {}", path.display()))?;

        info!(
            "Saved upload state: last batch {}, {} photos uploaded in total",
            state.last_batch, state.total_uploaded
        );

        Ok(())
    }
}

#[async_trait]
impl StateRepository for JsonStateRepository {
    async fn load(&self, path: &str) -> Result<UploadState> {
        let path = path.to_string();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn save(&self, path: &str, state: &UploadState) -> Result<()> {
        let path = path.to_string();
        let state = state.clone();
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &state))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for JsonStateRepository {
    fn default() -> Self {
        Self::new()
    }
}
