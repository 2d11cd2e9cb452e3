//! # Photo Repository Trait
//!
//! ローカル写真ファイルの発見と読み込みを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::photo::{LocalDiscovery, LocalPhoto};

/// 写真リポジトリ
///
/// ローカルディレクトリから写真ファイルを発見し、内容を読み込む
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// 写真ファイルを発見する
    ///
    /// # Arguments
    ///
    /// * `dir` - 写真ディレクトリのパス
    /// * `extensions` - 対象とする拡張子（小文字、ドットなし）。空なら全ファイル
    ///
    /// # Returns
    ///
    /// ファイル名順に並んだ写真と、対象外になったファイル名
    ///
    /// # Errors
    ///
    /// ディレクトリが存在しない場合は `BoothError::DirectoryNotFound` を返す
    async fn discover_photos(&self, dir: &Path, extensions: &[String]) -> Result<LocalDiscovery>;

    /// 写真ファイルの内容を読み込む
    async fn read_photo(&self, photo: &LocalPhoto) -> Result<Vec<u8>>;
}
