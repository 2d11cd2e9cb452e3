//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出してビジネスフローを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - ユーザーとのインターフェース（引数と対話入力）
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **prompt**: 省略された引数の対話入力
//! - **upload_workflow**: アップロードのオーケストレーション
//! - **send_workflow**: 送信のオーケストレーション

pub mod cli;
pub mod prompt;
pub mod send_workflow;
pub mod upload_workflow;

pub use cli::{SendArgs, UploadArgs};
pub use send_workflow::PhotoSendWorkflow;
pub use upload_workflow::PhotoUploadWorkflow;
