//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（写真のアップロードと送信）
//!
//! ## 特徴
//!
//! - Domain層のエンティティとサービスを組み合わせてビジネスフローを実現
//! - Repository traitに依存（実装には依存しない）
//! - Google Drive や Twilio の詳細は知らない
//!
//! ## 構成要素
//!
//! - **dto**: Data Transfer Object（アップロード設定、送信設定）
//! - **use_cases**: ユースケース

pub mod dto;
pub mod use_cases;
