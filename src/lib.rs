//! # boothsync
//!
//! フォトブースの写真を Google Drive にバッチ単位でアップロードし、
//! Twilio 経由で来場者の電話番号に送信するツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: バッチ番号・写真・送信先などのエンティティと衝突解決ルール（外部依存なし）
//! - **Application層**: アップロード/送信のユースケース
//! - **Adapter層**: 外部システムとの統合（Google Drive, Twilio, ファイルシステム等）
//! - **Driver層**: CLI、対話入力、依存性注入
//!
//! 2つのコマンド（`boothsync-upload` と `boothsync-send`）は実行時に直接やり取りせず、
//! バッチ番号を名前に持つ Drive フォルダを介して連携します。

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
