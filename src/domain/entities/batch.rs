//! # Batch Value Objects
//!
//! バッチ番号とバッチフォルダのバリューオブジェクト

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::BoothError;

/// バッチ番号
///
/// 1以上の整数。ストレージ上ではフォルダ名として10進数文字列で表現される
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BatchId(u32);

impl BatchId {
    /// 最初のバッチ番号
    pub const FIRST: BatchId = BatchId(1);

    /// 新しいバッチ番号を作成
    ///
    /// # Errors
    ///
    /// 0 の場合にエラーを返す
    pub fn new(value: u32) -> Result<Self, BoothError> {
        if value == 0 {
            return Err(BoothError::InvalidBatchId {
                input: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// 数値を返す
    pub fn value(&self) -> u32 {
        self.0
    }

    /// 次のバッチ番号を返す
    pub fn next(&self) -> BatchId {
        BatchId(self.0.saturating_add(1))
    }

    /// ストレージ上のフォルダ名
    pub fn folder_name(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchId {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: u32 = trimmed.parse().map_err(|_| BoothError::InvalidBatchId {
            input: trimmed.to_string(),
        })?;
        Self::new(value).map_err(|_| BoothError::InvalidBatchId {
            input: trimmed.to_string(),
        })
    }
}

impl TryFrom<u32> for BatchId {
    type Error = BoothError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BatchId> for u32 {
    fn from(batch: BatchId) -> Self {
        batch.0
    }
}

/// バッチフォルダ
///
/// バッチ番号に紐づくリモートストレージ上のフォルダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFolder {
    /// ストレージ側のフォルダID
    pub id: String,
    /// バッチ番号
    pub batch: BatchId,
}

impl BatchFolder {
    pub fn new(id: impl Into<String>, batch: BatchId) -> Self {
        Self {
            id: id.into(),
            batch,
        }
    }
}
