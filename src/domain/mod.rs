//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - Google Drive や Twilio について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（BatchId, LocalPhoto, RemotePhoto, Destination）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（ファイル名衝突の解決ルール）
//! - **errors**: ドメインエラー

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
