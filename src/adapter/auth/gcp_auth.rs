//! GCP Authentication
//!
//! Google Drive 用のアクセストークン取得

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_auth::credentials::{Builder, CacheableResource, Credentials};
use http::header::AUTHORIZATION;
use http::{Extensions, HeaderMap};

#[cfg(test)]
use mockall::automock;

/// Full Drive scope: create folders, upload files and change permissions
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Source of OAuth2 bearer tokens for Google APIs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Expands tilde in path and returns the full path
pub fn expand_key_path(key_path: &str) -> String {
    shellexpand::tilde(key_path).to_string()
}

/// Extracts the bearer token from an `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Token provider backed by google-cloud-auth credentials
pub struct GcpTokenProvider {
    credentials: Credentials,
}

impl GcpTokenProvider {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl AccessTokenProvider for GcpTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let headers = match self
            .credentials
            .headers(Extensions::new())
            .await
            .context("Failed to obtain Google access token")?
        {
            CacheableResource::New { data, .. } => data,
            CacheableResource::NotModified => {
                anyhow::bail!("Google credentials returned no authorization headers")
            }
        };

        bearer_token(&headers).context("Google credentials did not produce a bearer token")
    }
}

/// Creates a Drive token provider from a credentials file
pub fn create_drive_token_provider(key_path: &str) -> Result<GcpTokenProvider> {
    let expanded_path = expand_key_path(key_path);
    if !std::path::Path::new(&expanded_path).exists() {
        anyhow::bail!("Google credentials file not found: {}", expanded_path);
    }
    std::env::set_var("GOOGLE_APPLICATION_CREDENTIALS", &expanded_path);

    let credentials = Builder::default()
        .with_scopes([DRIVE_SCOPE])
        .build()
        .context("Failed to load Google credentials")?;

    Ok(GcpTokenProvider::new(credentials))
}
