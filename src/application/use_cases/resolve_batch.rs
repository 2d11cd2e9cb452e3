//! # Resolve Batch Use Case
//!
//! アップロード先バッチ番号の決定

use anyhow::Result;
use std::sync::Arc;

use crate::domain::entities::batch::BatchId;
use crate::domain::repositories::state_repository::StateRepository;

/// バッチ番号決定ユースケース
pub struct ResolveBatchUseCase<T: StateRepository> {
    state_repository: Arc<T>,
}

impl<T: StateRepository> ResolveBatchUseCase<T> {
    pub fn new(state_repository: Arc<T>) -> Self {
        Self { state_repository }
    }

    /// 使用するバッチ番号を決定する
    ///
    /// 指定がなければ状態ファイルの最後のバッチ番号 + 1 を返す
    pub async fn execute(&self, requested: Option<BatchId>, state_path: &str) -> Result<BatchId> {
        if let Some(batch) = requested {
            return Ok(batch);
        }
        let state = self.state_repository.load(state_path).await?;
        Ok(state.next_batch())
    }
}
