//! # Domain Services
//!
//! エンティティに属さないビジネスルール

pub mod conflict;
