//! Drive Search Queries
//!
//! `files.list` の `q` パラメータの組み立て

use super::models::FOLDER_MIME_TYPE;

/// Escapes a value for use inside a single-quoted query literal
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Folders named `name` directly under `parent_id`, excluding trashed ones
pub fn folder_by_name(parent_id: &str, name: &str) -> String {
    format!(
        "mimeType='{}' and trashed=false and name='{}' and '{}' in parents",
        FOLDER_MIME_TYPE,
        escape(name),
        escape(parent_id)
    )
}

/// Non-trashed children of `parent_id`
pub fn children_of(parent_id: &str) -> String {
    format!("'{}' in parents and trashed=false", escape(parent_id))
}
