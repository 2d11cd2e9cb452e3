//! Authentication Module
//!
//! Google認証とアクセストークンのキャッシュ

pub mod gcp_auth;
pub mod token_cache;

pub use gcp_auth::{create_drive_token_provider, AccessTokenProvider};
pub use token_cache::CachedTokenProvider;
