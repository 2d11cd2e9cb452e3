//! # Conflict Resolution Service
//!
//! 同名ファイルがバッチフォルダに既に存在する場合の扱いを決めるサービス

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::BoothError;

/// ファイル名衝突時のポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// 既存ファイルを残し、アップロードしない
    #[default]
    Skip,
    /// `name (n).ext` として別名でアップロードする
    Rename,
    /// 既存ファイルの内容を置き換える
    Overwrite,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictPolicy::Skip => "skip",
            ConflictPolicy::Rename => "rename",
            ConflictPolicy::Overwrite => "overwrite",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ConflictPolicy {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(ConflictPolicy::Skip),
            "rename" => Ok(ConflictPolicy::Rename),
            "overwrite" => Ok(ConflictPolicy::Overwrite),
            _ => Err(BoothError::InvalidConflictPolicy {
                input: s.to_string(),
            }),
        }
    }
}

/// 1ファイルに対するアップロード操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadAction {
    /// そのままの名前で新規作成
    Create { name: String },
    /// 既存ファイルがあるためスキップ
    Skip { name: String },
    /// 別名で新規作成
    Rename { name: String },
    /// 既存ファイルの内容を置き換え
    Replace { file_id: String, name: String },
}

/// 衝突解決サービス
///
/// リモートに既に存在するファイル名（名前 → ファイルID）とポリシーから、
/// 各ファイルのアップロード操作を決定する
pub struct ConflictResolver;

impl ConflictResolver {
    /// アップロード操作を決定する
    ///
    /// # Arguments
    ///
    /// * `file_name` - アップロードするファイル名
    /// * `existing` - バッチフォルダに存在するファイル名とIDの対応
    /// * `policy` - 衝突時のポリシー
    pub fn resolve(
        file_name: &str,
        existing: &HashMap<String, String>,
        policy: ConflictPolicy,
    ) -> UploadAction {
        let Some(file_id) = existing.get(file_name) else {
            return UploadAction::Create {
                name: file_name.to_string(),
            };
        };

        match policy {
            ConflictPolicy::Skip => UploadAction::Skip {
                name: file_name.to_string(),
            },
            ConflictPolicy::Rename => UploadAction::Rename {
                name: Self::free_name(file_name, existing),
            },
            ConflictPolicy::Overwrite => UploadAction::Replace {
                file_id: file_id.clone(),
                name: file_name.to_string(),
            },
        }
    }

    /// `existing` と衝突しない `name (n).ext` 形式の名前を返す（n >= 1 の最小値）
    pub fn free_name(file_name: &str, existing: &HashMap<String, String>) -> String {
        let (stem, ext) = split_extension(file_name);

        (1..)
            .map(|n| match ext {
                Some(ext) => format!("{} ({}).{}", stem, n, ext),
                None => format!("{} ({})", stem, n),
            })
            .find(|candidate| !existing.contains_key(candidate))
            .unwrap_or_else(|| file_name.to_string())
    }
}

/// 拡張子を分離する（先頭のドットは拡張子とみなさない）
fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => {
            (&file_name[..idx], Some(&file_name[idx + 1..]))
        }
        _ => (file_name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(names: &[&str]) -> HashMap<String, String> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.to_string(), format!("id-{}", i)))
            .collect()
    }

    #[test]
    fn test_resolve_no_conflict_creates() {
        let remote = existing(&["a.jpg"]);
        let action = ConflictResolver::resolve("b.jpg", &remote, ConflictPolicy::Skip);
        assert_eq!(
            action,
            UploadAction::Create {
                name: "b.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_skip() {
        let remote = existing(&["a.jpg"]);
        let action = ConflictResolver::resolve("a.jpg", &remote, ConflictPolicy::Skip);
        assert_eq!(
            action,
            UploadAction::Skip {
                name: "a.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_overwrite_uses_existing_id() {
        let remote = existing(&["x.png", "a.jpg"]);
        let action = ConflictResolver::resolve("a.jpg", &remote, ConflictPolicy::Overwrite);
        assert_eq!(
            action,
            UploadAction::Replace {
                file_id: "id-1".to_string(),
                name: "a.jpg".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_rename_picks_smallest_free_suffix() {
        let remote = existing(&["a.jpg", "a (1).jpg", "a (3).jpg"]);
        let action = ConflictResolver::resolve("a.jpg", &remote, ConflictPolicy::Rename);
        assert_eq!(
            action,
            UploadAction::Rename {
                name: "a (2).jpg".to_string()
            }
        );
    }

    #[test]
    fn test_free_name_without_extension() {
        let remote = existing(&["README"]);
        assert_eq!(ConflictResolver::free_name("README", &remote), "README (1)");
    }

    #[test]
    fn test_free_name_hidden_file() {
        let remote = existing(&[".photo"]);
        assert_eq!(ConflictResolver::free_name(".photo", &remote), ".photo (1)");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("skip".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Skip);
        assert_eq!("Rename".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Rename);
        assert_eq!(
            " overwrite ".parse::<ConflictPolicy>().unwrap(),
            ConflictPolicy::Overwrite
        );
        assert!("merge".parse::<ConflictPolicy>().is_err());
    }

    #[test]
    fn test_policy_serde_lowercase() {
        let json = serde_json::to_string(&ConflictPolicy::Overwrite).unwrap();
        assert_eq!(json, "\"overwrite\"");
        let back: ConflictPolicy = serde_json::from_str("\"rename\"").unwrap();
        assert_eq!(back, ConflictPolicy::Rename);
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::Skip);
    }
}
