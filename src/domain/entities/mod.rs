//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **BatchId / BatchFolder**: 写真のグループを識別するバッチ番号とリモートフォルダ
//! - **LocalPhoto / RemotePhoto**: ローカルの写真ファイルとストレージ上の写真
//! - **Destination**: 写真の送信先電話番号

pub mod batch;
pub mod destination;
pub mod photo;
