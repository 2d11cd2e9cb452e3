//! Access Token Cache
//!
//! Persists the Drive access token to the token file so that repeated runs
//! reuse it until it expires.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use super::gcp_auth::AccessTokenProvider;

/// Google access tokens are valid for one hour; refresh a bit earlier
pub const TOKEN_LIFETIME_SECS: i64 = 55 * 60;
/// Tokens expiring within this window are treated as expired
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Contents of the token file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    /// Credentials file the token was issued for
    #[serde(default)]
    pub credentials_path: Option<String>,
}

impl CachedToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty()
            && self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

/// Token provider that caches tokens of an inner provider in a JSON file
///
/// A cached token is only reused when it was issued for the same
/// credentials file.
pub struct CachedTokenProvider<P: AccessTokenProvider> {
    inner: P,
    token_path: String,
    credentials_path: String,
    current: Mutex<Option<CachedToken>>,
}

impl<P: AccessTokenProvider> CachedTokenProvider<P> {
    pub fn new(
        inner: P,
        token_path: impl Into<String>,
        credentials_path: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            token_path: shellexpand::tilde(&token_path.into()).to_string(),
            credentials_path: shellexpand::tilde(&credentials_path.into()).to_string(),
            current: Mutex::new(None),
        }
    }

    fn issued_for_credentials(&self, token: &CachedToken) -> bool {
        token.credentials_path.as_deref() == Some(self.credentials_path.as_str())
    }

    fn load_sync(path: &str) -> Option<CachedToken> {
        let path = Path::new(path);
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read token file {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Ignoring unreadable token file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save_sync(path: &str, token: &CachedToken) -> Result<()> {
        let path = Path::new(path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create token directory")?;
            }
        }

        let json = serde_json::to_string_pretty(token).context("Failed to serialize token")?;
        Self::write_private(path, json.as_bytes()).context("Failed to write token file")?;

        Ok(())
    }

    /// Writes the file readable by the owner only
    #[cfg(unix)]
    fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        // mode() only applies to newly created files
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(data)
    }

    #[cfg(not(unix))]
    fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
        fs::write(path, data)
    }

    fn cached_valid(&self, now: DateTime<Utc>) -> Option<String> {
        let guard = self.current.lock().ok()?;
        guard
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| token.access_token.clone())
    }

    fn remember(&self, token: CachedToken) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = Some(token);
        }
    }
}

#[async_trait]
impl<P: AccessTokenProvider> AccessTokenProvider for CachedTokenProvider<P> {
    async fn access_token(&self) -> Result<String> {
        let now = Utc::now();

        if let Some(token) = self.cached_valid(now) {
            return Ok(token);
        }

        if let Some(token) = Self::load_sync(&self.token_path) {
            if !self.issued_for_credentials(&token) {
                info!(
                    "Cached token in {} belongs to other credentials, requesting a new one",
                    self.token_path
                );
            } else if token.is_valid_at(now) {
                debug!("Using cached token from {}", self.token_path);
                let access_token = token.access_token.clone();
                self.remember(token);
                return Ok(access_token);
            } else {
                info!("Cached token expired, requesting a new one");
            }
        }

        let access_token = self.inner.access_token().await?;
        let token = CachedToken {
            access_token: access_token.clone(),
            expires_at: now + Duration::seconds(TOKEN_LIFETIME_SECS),
            credentials_path: Some(self.credentials_path.clone()),
        };

        Self::save_sync(&self.token_path, &token)?;
        info!("Saved access token to {}", self.token_path);
        self.remember(token);

        Ok(access_token)
    }
}
