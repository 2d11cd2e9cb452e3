//! # Photo Entities
//!
//! ローカルの写真ファイルとリモートストレージ上の写真

use std::path::PathBuf;

/// ローカルディスク上の写真ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPhoto {
    /// ファイルのパス
    pub path: PathBuf,
    /// ファイル名（アップロード時のリモート名）
    pub file_name: String,
    /// ファイルサイズ（バイト）
    pub size: u64,
    /// MIMEタイプ
    pub mime_type: String,
}

/// ローカルフォルダの探索結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalDiscovery {
    /// アップロード対象の写真（ファイル名順）
    pub photos: Vec<LocalPhoto>,
    /// 拡張子フィルタや読み取りエラーで対象外になったファイル名
    pub ignored: Vec<String>,
}

/// リモートストレージ上の写真
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePhoto {
    /// ストレージ側のファイルID
    pub id: String,
    /// ファイル名
    pub name: String,
    /// MIMEタイプ
    pub mime_type: Option<String>,
    /// ブラウザ表示用リンク
    pub web_view_link: Option<String>,
}

impl RemotePhoto {
    /// 直接ダウンロード可能な共有URLを返す
    ///
    /// メッセージングAPIのメディアURLとして利用する
    ///
    /// # 例
    ///
    /// ```
    /// use boothsync::domain::entities::photo::RemotePhoto;
    ///
    /// let photo = RemotePhoto {
    ///     id: "abc123".to_string(),
    ///     name: "IMG_0001.jpg".to_string(),
    ///     mime_type: Some("image/jpeg".to_string()),
    ///     web_view_link: None,
    /// };
    ///
    /// assert_eq!(
    ///     photo.download_url(),
    ///     "https://drive.google.com/uc?id=abc123&export=download"
    /// );
    /// ```
    pub fn download_url(&self) -> String {
        format!("https://drive.google.com/uc?id={}&export=download", self.id)
    }
}
