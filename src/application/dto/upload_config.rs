//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use crate::domain::services::conflict::ConflictPolicy;

/// アップロード設定
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// 同名ファイルが存在する場合のポリシー
    pub conflict_policy: ConflictPolicy,
    /// 対象とする拡張子（小文字、ドットなし）。空の場合はすべてのファイルが対象
    pub photo_extensions: Vec<String>,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// 拡張子は小文字化され、先頭のドットは取り除かれます。
    ///
    /// # 例
    ///
    /// ```
    /// use boothsync::application::dto::upload_config::UploadConfig;
    /// use boothsync::domain::services::conflict::ConflictPolicy;
    ///
    /// let config = UploadConfig::new(
    ///     ConflictPolicy::Rename,
    ///     vec![".JPG".to_string(), "png".to_string()],
    /// );
    ///
    /// assert_eq!(config.conflict_policy, ConflictPolicy::Rename);
    /// assert_eq!(config.photo_extensions, vec!["jpg", "png"]);
    /// ```
    pub fn new(conflict_policy: ConflictPolicy, photo_extensions: Vec<String>) -> Self {
        let photo_extensions = photo_extensions
            .into_iter()
            .map(|ext| Self::normalize_extension(&ext))
            .filter(|ext| !ext.is_empty())
            .collect();

        Self {
            conflict_policy,
            photo_extensions,
        }
    }

    /// 拡張子を小文字・ドットなしに正規化する
    pub fn normalize_extension(ext: &str) -> String {
        ext.trim().trim_start_matches('.').to_ascii_lowercase()
    }

    /// 拡張子フィルタを使わずすべてのファイルを対象にするかどうか
    pub fn accepts_all_files(&self) -> bool {
        self.photo_extensions.is_empty()
    }
}
