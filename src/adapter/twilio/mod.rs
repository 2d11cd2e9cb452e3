//! Twilio Adapter Modules
//!
//! Twilio Messages API との統合

pub mod client;
pub mod models;
