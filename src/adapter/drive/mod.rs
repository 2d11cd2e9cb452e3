//! Google Drive Adapter Modules
//!
//! Drive v3 REST API との統合

pub mod client;
pub mod models;
pub mod query;
