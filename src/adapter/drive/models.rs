//! Drive API Models
//!
//! Drive v3 のリクエスト/レスポンス表現

use serde::{Deserialize, Serialize};

use crate::domain::entities::photo::RemotePhoto;

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// File resource (only the fields requested by this tool)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

impl DriveFile {
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }
}

impl From<DriveFile> for RemotePhoto {
    fn from(file: DriveFile) -> Self {
        RemotePhoto {
            id: file.id,
            name: file.name,
            mime_type: file.mime_type,
            web_view_link: file.web_view_link,
        }
    }
}

/// Response of `files.list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Metadata body for `files.create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

impl FileMetadata {
    pub fn folder(name: &str, parent_id: &str) -> Self {
        Self {
            name: name.to_string(),
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
            parents: vec![parent_id.to_string()],
        }
    }

    pub fn file(name: &str, parent_id: &str) -> Self {
        Self {
            name: name.to_string(),
            mime_type: None,
            parents: vec![parent_id.to_string()],
        }
    }
}

/// Body for `permissions.create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRequest {
    pub role: String,
    #[serde(rename = "type")]
    pub grantee_type: String,
}

impl PermissionRequest {
    /// Anyone with the link can view
    pub fn anyone_reader() -> Self {
        Self {
            role: "reader".to_string(),
            grantee_type: "anyone".to_string(),
        }
    }
}
