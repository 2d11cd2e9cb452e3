//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod drive_storage_repository;
pub mod file_photo_repository;
pub mod json_state_repository;
pub mod twilio_messaging_repository;
