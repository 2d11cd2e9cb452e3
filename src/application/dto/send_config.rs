//! # Send Configuration DTO
//!
//! 送信設定のData Transfer Object

/// 送信設定
#[derive(Debug, Clone)]
pub struct SendConfig {
    /// メッセージ本文
    pub message_body: String,
    /// 送信前にバッチフォルダを「リンクを知っている全員」に公開するかどうか
    ///
    /// メッセージングプロバイダがメディアURLを取得できる必要がある
    pub share_folder: bool,
}

impl SendConfig {
    /// 新しい送信設定を作成
    pub fn new(message_body: impl Into<String>, share_folder: bool) -> Self {
        Self {
            message_body: message_body.into(),
            share_folder,
        }
    }
}
