//! # Data Transfer Objects
//!
//! ユースケースに渡す設定値

pub mod send_config;
pub mod upload_config;
