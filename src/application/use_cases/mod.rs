//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **DiscoverPhotosUseCase**: ローカル写真ファイルの発見
//! - **ResolveBatchUseCase**: アップロード先バッチ番号の決定（自動採番）
//! - **UploadPhotosUseCase**: バッチフォルダへの写真のアップロード
//! - **ListBatchPhotosUseCase**: バッチに属するリモート写真の列挙
//! - **SendPhotosUseCase**: バッチの写真を送信先へ送信

pub mod discover_photos;
pub mod list_batch_photos;
pub mod resolve_batch;
pub mod send_photos;
pub mod upload_photos;
