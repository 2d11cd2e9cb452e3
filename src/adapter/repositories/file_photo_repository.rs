//! File Photo Repository Implementation
//!
//! PhotoRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::photo::{LocalDiscovery, LocalPhoto};
use crate::domain::errors::BoothError;
use crate::domain::repositories::photo_repository::PhotoRepository;

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// ファイルシステムベースの写真リポジトリ
pub struct FilePhotoRepository;

impl FilePhotoRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// 写真ファイルを発見する（内部実装）
    ///
    /// 直下のファイルのみを対象とし、隠しファイルは除外する。
    /// 拡張子リストが空ならすべてのファイルを対象とする
    fn discover_photos_internal(dir: &Path, extensions: &[String]) -> Result<LocalDiscovery> {
        let expanded_path = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
        let dir = PathBuf::from(expanded_path);

        if !dir.is_dir() {
            return Err(BoothError::DirectoryNotFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        let mut discovery = LocalDiscovery::default();

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            // 壊れたシンボリックリンクなど
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    if let Some(name) = e.path().and_then(|p| p.file_name()) {
                        discovery.ignored.push(name.to_string_lossy().into_owned());
                    }
                    continue;
                }
            };
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();

            if !entry.file_type().is_file() || file_name.starts_with('.') {
                continue;
            }
            if !Self::has_photo_extension(path, extensions) {
                debug!("Skipping file outside photo_extensions: {}", path.display());
                discovery.ignored.push(file_name);
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    discovery.ignored.push(file_name);
                    continue;
                }
            };

            discovery.photos.push(LocalPhoto {
                path: path.to_path_buf(),
                file_name,
                size: metadata.len(),
                mime_type: Self::guess_mime_type(path),
            });
        }

        info!(
            "Found {} photos in {} ({} ignored)",
            discovery.photos.len(),
            dir.display(),
            discovery.ignored.len()
        );

        Ok(discovery)
    }

    fn has_photo_extension(path: &Path, extensions: &[String]) -> bool {
        if extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .is_some_and(|ext| extensions.iter().any(|allowed| *allowed == ext))
    }

    fn guess_mime_type(path: &Path) -> String {
        mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string()
    }
}

#[async_trait]
impl PhotoRepository for FilePhotoRepository {
    async fn discover_photos(&self, dir: &Path, extensions: &[String]) -> Result<LocalDiscovery> {
        let dir = dir.to_path_buf();
        let extensions = extensions.to_vec();
        tokio::task::spawn_blocking(move || Self::discover_photos_internal(&dir, &extensions))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn read_photo(&self, photo: &LocalPhoto) -> Result<Vec<u8>> {
        let path = photo.path.clone();
        tokio::task::spawn_blocking(move || {
            fs::read(&path).with_context(|| format!("Failed to read photo: {}", path.display()))
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FilePhotoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn extensions() -> Vec<String> {
        vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
    }

    fn write(dir: &TempDir, name: &str, content: &[u8]) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[tokio::test]
    async fn test_discover_photos_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.JPG", b"bb");
        write(&dir, "a.png", b"a");
        write(&dir, "notes.txt", b"ignored");
        write(&dir, ".hidden.jpg", b"ignored");
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.jpg"), b"ignored").unwrap();

        let repo = FilePhotoRepository::new();
        let discovery = repo.discover_photos(dir.path(), &extensions()).await.unwrap();
        let photos = &discovery.photos;

        let names: Vec<&str> = photos.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.JPG"]);
        assert_eq!(photos[0].mime_type, "image/png");
        assert_eq!(photos[1].mime_type, "image/jpeg");
        assert_eq!(photos[1].size, 2);
        assert_eq!(discovery.ignored, vec!["notes.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_discover_photos_without_filter_keeps_every_format() {
        let dir = TempDir::new().unwrap();
        write(&dir, "IMG_0001.jpg", b"1");
        write(&dir, "IMG_0002.tiff", b"2");
        write(&dir, "IMG_0003.raw", b"3");

        let repo = FilePhotoRepository::new();
        let discovery = repo.discover_photos(dir.path(), &[]).await.unwrap();

        let names: Vec<&str> = discovery
            .photos
            .iter()
            .map(|p| p.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["IMG_0001.jpg", "IMG_0002.tiff", "IMG_0003.raw"]);
        assert!(discovery.ignored.is_empty());
    }

    #[tokio::test]
    async fn test_discover_photos_reports_filtered_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "IMG_0001.jpg", b"1");
        write(&dir, "IMG_0002.tiff", b"2");
        write(&dir, "IMG_0003.raw", b"3");

        let repo = FilePhotoRepository::new();
        let discovery = repo
            .discover_photos(dir.path(), &extensions())
            .await
            .unwrap();

        assert_eq!(discovery.photos.len(), 1);
        assert_eq!(
            discovery.ignored,
            vec!["IMG_0002.tiff".to_string(), "IMG_0003.raw".to_string()]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_discover_photos_skips_dangling_symlink() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.jpg", b"a");
        std::os::unix::fs::symlink(
            dir.path().join("gone.jpg"),
            dir.path().join("broken.jpg"),
        )
        .unwrap();

        let repo = FilePhotoRepository::new();
        let discovery = repo.discover_photos(dir.path(), &[]).await.unwrap();

        assert_eq!(discovery.photos.len(), 1);
        assert_eq!(discovery.photos[0].file_name, "a.jpg");
        assert_eq!(discovery.ignored, vec!["broken.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_discover_photos_empty_directory() {
        let dir = TempDir::new().unwrap();

        let repo = FilePhotoRepository::new();
        let discovery = repo.discover_photos(dir.path(), &extensions()).await.unwrap();

        assert!(discovery.photos.is_empty());
        assert!(discovery.ignored.is_empty());
    }

    #[tokio::test]
    async fn test_discover_photos_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let repo = FilePhotoRepository::new();
        let err = repo
            .discover_photos(&missing, &extensions())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BoothError>(),
            Some(BoothError::DirectoryNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_discover_photos_rejects_file_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.jpg", b"a");

        let repo = FilePhotoRepository::new();
        let result = repo
            .discover_photos(&dir.path().join("a.jpg"), &extensions())
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_read_photo() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.jpg", b"jpeg-bytes");

        let repo = FilePhotoRepository::new();
        let discovery = repo.discover_photos(dir.path(), &extensions()).await.unwrap();
        let data = repo.read_photo(&discovery.photos[0]).await.unwrap();

        assert_eq!(data, b"jpeg-bytes");
    }

    #[test]
    fn test_guess_mime_type_falls_back_to_jpeg() {
        assert_eq!(
            FilePhotoRepository::guess_mime_type(Path::new("photo.unknownext")),
            "image/jpeg"
        );
        assert_eq!(
            FilePhotoRepository::guess_mime_type(Path::new("photo.heic")),
            mime_guess::from_path("photo.heic")
                .first_raw()
                .unwrap_or("image/jpeg")
        );
    }
}
