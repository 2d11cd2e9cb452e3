//! # Domain Errors
//!
//! ドメイン層のエラー定義

use thiserror::Error;

/// boothsync のドメインエラー
///
/// ベンダーAPIやI/Oの失敗は `anyhow::Error` として伝播し、
/// ここでは利用者に意味のある失敗だけを型として表現する
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoothError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Invalid batch number: '{input}' (expected a positive integer)")]
    InvalidBatchId { input: String },

    #[error("Invalid phone number: '{input}'")]
    InvalidDestination { input: String },

    #[error("Invalid conflict policy: '{input}' (expected skip, rename or overwrite)")]
    InvalidConflictPolicy { input: String },

    #[error("{service} API error {status}: {message}")]
    Api {
        service: String,
        status: u16,
        message: String,
    },
}

impl BoothError {
    /// HTTP APIのエラーを作成
    pub fn api(service: &str, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            service: service.to_string(),
            status,
            message: message.into(),
        }
    }
}
