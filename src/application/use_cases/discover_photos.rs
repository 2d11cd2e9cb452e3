//! # Discover Photos Use Case
//!
//! 写真ファイル発見ユースケース

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::photo::LocalDiscovery;
use crate::domain::repositories::photo_repository::PhotoRepository;

/// 写真ファイル発見ユースケース
///
/// 指定されたディレクトリからアップロード対象の写真を発見する
pub struct DiscoverPhotosUseCase<R: PhotoRepository> {
    photo_repository: Arc<R>,
}

impl<R: PhotoRepository> DiscoverPhotosUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `photo_repository` - 写真リポジトリ
    pub fn new(photo_repository: Arc<R>) -> Self {
        Self { photo_repository }
    }

    /// 写真ファイルを発見する
    ///
    /// # Arguments
    ///
    /// * `dir` - 写真ディレクトリのパス
    /// * `config` - アップロード設定（対象拡張子、空ならすべて）
    ///
    /// # Returns
    ///
    /// 写真と、拡張子フィルタで除外されたファイル名
    ///
    /// # Errors
    ///
    /// ディレクトリが存在しない場合にエラーを返す
    pub async fn execute(&self, dir: &Path, config: &UploadConfig) -> Result<LocalDiscovery> {
        self.photo_repository
            .discover_photos(dir, &config.photo_extensions)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    use crate::domain::entities::photo::LocalPhoto;
    use crate::domain::errors::BoothError;
    use crate::domain::services::conflict::ConflictPolicy;

    struct MockPhotoRepository {
        photos: Vec<LocalPhoto>,
    }

    #[async_trait]
    impl PhotoRepository for MockPhotoRepository {
        async fn discover_photos(
            &self,
            dir: &Path,
            extensions: &[String],
        ) -> Result<LocalDiscovery> {
            if dir == Path::new("/missing") {
                return Err(BoothError::DirectoryNotFound {
                    path: dir.display().to_string(),
                }
                .into());
            }
            let (photos, ignored): (Vec<LocalPhoto>, Vec<LocalPhoto>) =
                self.photos.iter().cloned().partition(|p| {
                    extensions.is_empty()
                        || p.path
                            .extension()
                            .and_then(|e| e.to_str())
                            .is_some_and(|e| extensions.iter().any(|x| x == e))
                });
            Ok(LocalDiscovery {
                photos,
                ignored: ignored.into_iter().map(|p| p.file_name).collect(),
            })
        }

        async fn read_photo(&self, _photo: &LocalPhoto) -> Result<Vec<u8>> {
            Ok(vec![])
        }
    }

    fn photo(name: &str) -> LocalPhoto {
        LocalPhoto {
            path: PathBuf::from("/booth").join(name),
            file_name: name.to_string(),
            size: 10,
            mime_type: "image/jpeg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_discover_photos_passes_extensions() {
        let mock_repo = Arc::new(MockPhotoRepository {
            photos: vec![photo("a.jpg"), photo("notes.txt"), photo("b.png")],
        });
        let use_case = DiscoverPhotosUseCase::new(mock_repo);
        let config = UploadConfig::new(ConflictPolicy::Skip, vec!["jpg".to_string()]);

        let discovered = use_case.execute(Path::new("/booth"), &config).await.unwrap();

        assert_eq!(discovered.photos.len(), 1);
        assert_eq!(discovered.photos[0].file_name, "a.jpg");
        assert_eq!(discovered.ignored, vec!["notes.txt", "b.png"]);
    }

    #[tokio::test]
    async fn test_discover_photos_without_extensions_keeps_everything() {
        let mock_repo = Arc::new(MockPhotoRepository {
            photos: vec![photo("a.jpg"), photo("b.tiff"), photo("c.raw")],
        });
        let use_case = DiscoverPhotosUseCase::new(mock_repo);
        let config = UploadConfig::new(ConflictPolicy::Skip, vec![]);

        let discovered = use_case.execute(Path::new("/booth"), &config).await.unwrap();

        assert_eq!(discovered.photos.len(), 3);
        assert!(discovered.ignored.is_empty());
    }

    #[tokio::test]
    async fn test_discover_photos_missing_directory() {
        let mock_repo = Arc::new(MockPhotoRepository { photos: vec![] });
        let use_case = DiscoverPhotosUseCase::new(mock_repo);
        let config = UploadConfig::new(ConflictPolicy::Skip, vec!["jpg".to_string()]);

        let result = use_case.execute(Path::new("/missing"), &config).await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BoothError>(),
            Some(BoothError::DirectoryNotFound { .. })
        ));
    }
}
