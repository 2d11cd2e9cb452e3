//! Drive Client Abstractions
//!
//! クライアントの抽象化と reqwest 実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Client, RequestBuilder};

#[cfg(test)]
use mockall::automock;

use super::models::{DriveFile, FileList, FileMetadata, PermissionRequest};
use crate::adapter::auth::AccessTokenProvider;
use crate::adapter::http_error::ensure_success;

pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

const SERVICE: &str = "Drive";
const FILE_FIELDS: &str = "id, name, mimeType, webViewLink";
const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, webViewLink)";
const PAGE_SIZE: &str = "100";

/// Trait for the Drive v3 operations this tool needs
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// One page of `files.list` for the given query
    async fn list_files(&self, query: &str, page_token: Option<String>) -> Result<FileList>;

    /// Create a metadata-only file (used for folders)
    async fn create_file(&self, metadata: &FileMetadata) -> Result<DriveFile>;

    /// Create a file with content through a resumable upload session
    async fn upload_file(
        &self,
        metadata: &FileMetadata,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile>;

    /// Replace the content of an existing file, keeping its id
    async fn update_file_content(
        &self,
        file_id: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile>;

    async fn create_permission(&self, file_id: &str, permission: &PermissionRequest)
        -> Result<()>;
}

/// Drive REST client using reqwest and a bearer token provider
pub struct ReqwestDriveClient<T: AccessTokenProvider> {
    http: Client,
    tokens: T,
    api_base: String,
    upload_base: String,
}

impl<T: AccessTokenProvider> ReqwestDriveClient<T> {
    pub fn new(tokens: T) -> Self {
        Self::with_base_urls(tokens, DRIVE_API_BASE, DRIVE_UPLOAD_BASE)
    }

    pub fn with_base_urls(tokens: T, api_base: &str, upload_base: &str) -> Self {
        Self {
            http: Client::new(),
            tokens,
            api_base: api_base.trim_end_matches('/').to_string(),
            upload_base: upload_base.trim_end_matches('/').to_string(),
        }
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<reqwest::Response> {
        let token = self.tokens.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("Drive request failed: {}", action))?;
        ensure_success(SERVICE, response).await
    }

    /// Opens a resumable session and returns its upload URL
    async fn start_session(
        &self,
        request: RequestBuilder,
        mime_type: &str,
        content_length: usize,
        action: &str,
    ) -> Result<String> {
        let request = request
            .query(&[("uploadType", "resumable"), ("fields", FILE_FIELDS)])
            .header("X-Upload-Content-Type", mime_type)
            .header("X-Upload-Content-Length", content_length.to_string());

        let response = self.send(request, action).await?;

        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .context("Drive did not return an upload session URL")
    }

    async fn upload_content(
        &self,
        session_url: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile> {
        debug!("Uploading {} bytes to resumable session", data.len());
        let response = self
            .http
            .put(session_url)
            .header(CONTENT_TYPE, mime_type)
            .body(data)
            .send()
            .await
            .context("Drive upload failed")?;
        let response = ensure_success(SERVICE, response).await?;

        response
            .json::<DriveFile>()
            .await
            .context("Failed to parse Drive upload response")
    }
}

#[async_trait]
impl<T: AccessTokenProvider> DriveApi for ReqwestDriveClient<T> {
    async fn list_files(&self, query: &str, page_token: Option<String>) -> Result<FileList> {
        let mut params = vec![
            ("q", query.to_string()),
            ("spaces", "drive".to_string()),
            ("fields", LIST_FIELDS.to_string()),
            ("orderBy", "name".to_string()),
            ("pageSize", PAGE_SIZE.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let request = self
            .http
            .get(format!("{}/files", self.api_base))
            .query(&params);
        let response = self.send(request, "files.list").await?;

        response
            .json::<FileList>()
            .await
            .context("Failed to parse Drive file list")
    }

    async fn create_file(&self, metadata: &FileMetadata) -> Result<DriveFile> {
        let request = self
            .http
            .post(format!("{}/files", self.api_base))
            .query(&[("fields", FILE_FIELDS)])
            .json(metadata);
        let response = self.send(request, "files.create").await?;

        response
            .json::<DriveFile>()
            .await
            .context("Failed to parse Drive file")
    }

    async fn upload_file(
        &self,
        metadata: &FileMetadata,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile> {
        let request = self
            .http
            .post(format!("{}/files", self.upload_base))
            .json(metadata);
        let session_url = self
            .start_session(request, mime_type, data.len(), "files.create (upload)")
            .await?;

        self.upload_content(&session_url, mime_type, data).await
    }

    async fn update_file_content(
        &self,
        file_id: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile> {
        let request = self
            .http
            .patch(format!("{}/files/{}", self.upload_base, file_id))
            .json(&serde_json::json!({}));
        let session_url = self
            .start_session(request, mime_type, data.len(), "files.update (upload)")
            .await?;

        self.upload_content(&session_url, mime_type, data).await
    }

    async fn create_permission(
        &self,
        file_id: &str,
        permission: &PermissionRequest,
    ) -> Result<()> {
        let request = self
            .http
            .post(format!("{}/files/{}/permissions", self.api_base, file_id))
            .json(permission);
        self.send(request, "permissions.create").await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::auth::gcp_auth::MockAccessTokenProvider;
    use crate::domain::errors::BoothError;
    use mockito::{Matcher, Server};

    fn token_provider() -> MockAccessTokenProvider {
        let mut tokens = MockAccessTokenProvider::new();
        tokens
            .expect_access_token()
            .returning(|| Ok("test-token".to_string()));
        tokens
    }

    fn client_for(server: &Server) -> ReqwestDriveClient<MockAccessTokenProvider> {
        ReqwestDriveClient::with_base_urls(
            token_provider(),
            &server.url(),
            &format!("{}/upload", server.url()),
        )
    }

    #[tokio::test]
    async fn test_list_files_sends_query_and_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/files")
            .match_header("authorization", "Bearer test-token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "'root' in parents".into()),
                Matcher::UrlEncoded("pageToken".into(), "p2".into()),
                Matcher::UrlEncoded("spaces".into(), "drive".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"files":[{"id":"f1","name":"a.jpg","mimeType":"image/jpeg"}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let list = client
            .list_files("'root' in parents", Some("p2".to_string()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(list.files.len(), 1);
        assert_eq!(list.files[0].name, "a.jpg");
        assert!(list.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_create_folder() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/files")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJsonString(
                r#"{"name":"4","mimeType":"application/vnd.google-apps.folder","parents":["root"]}"#
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"folder-4","name":"4"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let folder = client
            .create_file(&FileMetadata::folder("4", "root"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(folder.id, "folder-4");
    }

    #[tokio::test]
    async fn test_upload_file_uses_resumable_session() {
        let mut server = Server::new_async().await;
        let session_url = format!("{}/session/xyz", server.url());

        let start = server
            .mock("POST", "/upload/files")
            .match_query(Matcher::UrlEncoded("uploadType".into(), "resumable".into()))
            .match_header("x-upload-content-type", "image/jpeg")
            .match_header("x-upload-content-length", "5")
            .with_status(200)
            .with_header("location", &session_url)
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/session/xyz")
            .match_header("content-type", "image/jpeg")
            .match_body("hello")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"file-1","name":"a.jpg","mimeType":"image/jpeg"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let file = client
            .upload_file(
                &FileMetadata::file("a.jpg", "folder-1"),
                "image/jpeg",
                b"hello".to_vec(),
            )
            .await
            .unwrap();

        start.assert_async().await;
        put.assert_async().await;
        assert_eq!(file.id, "file-1");
    }

    #[tokio::test]
    async fn test_update_file_content_patches_existing_id() {
        let mut server = Server::new_async().await;
        let session_url = format!("{}/session/upd", server.url());

        let start = server
            .mock("PATCH", "/upload/files/file-9")
            .match_query(Matcher::UrlEncoded("uploadType".into(), "resumable".into()))
            .with_status(200)
            .with_header("location", &session_url)
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/session/upd")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"file-9","name":"a.jpg"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let file = client
            .update_file_content("file-9", "image/png", vec![1, 2, 3])
            .await
            .unwrap();

        start.assert_async().await;
        put.assert_async().await;
        assert_eq!(file.id, "file-9");
    }

    #[tokio::test]
    async fn test_upload_without_session_url_fails() {
        let mut server = Server::new_async().await;
        let _start = server
            .mock("POST", "/upload/files")
            .match_query(Matcher::Any)
            .with_status(200)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .upload_file(&FileMetadata::file("a.jpg", "f"), "image/jpeg", vec![0])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("upload session URL"));
    }

    #[tokio::test]
    async fn test_create_permission() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/files/folder-1/permissions")
            .match_body(Matcher::Json(serde_json::json!({
                "role": "reader",
                "type": "anyone"
            })))
            .with_status(200)
            .with_body(r#"{"id":"anyoneWithLink"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .create_permission("folder-1", &PermissionRequest::anyone_reader())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_is_surfaced() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/files")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"Insufficient Permission"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.list_files("q", None).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<BoothError>(),
            Some(&BoothError::api("Drive", 403, "Insufficient Permission"))
        );
    }
}
