//! HTTP Error Handling
//!
//! Converts non-success vendor responses into `BoothError::Api`

use anyhow::Result;
use reqwest::Response;
use serde_json::Value;

use crate::domain::errors::BoothError;

/// Returns the response unchanged if its status is 2xx, otherwise an API error
pub async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(BoothError::api(service, status.as_u16(), extract_error_message(&body)).into())
}

/// Extracts a readable message from a vendor error body
///
/// Understands Google (`{"error": {"message": ..}}`), OAuth
/// (`{"error": .., "error_description": ..}`) and Twilio (`{"message": ..}`)
/// shapes; anything else is returned trimmed.
pub fn extract_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    if let Some(message) = json.pointer("/error/message").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(description) = json.get("error_description").and_then(Value::as_str) {
        return description.to_string();
    }
    if let Some(message) = json.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(error) = json.get("error").and_then(Value::as_str) {
        return error.to_string();
    }

    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_google_error() {
        let body = r#"{"error":{"code":404,"message":"File not found: abc.","errors":[]}}"#;
        assert_eq!(extract_error_message(body), "File not found: abc.");
    }

    #[test]
    fn test_extract_oauth_error() {
        let body = r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#;
        assert_eq!(
            extract_error_message(body),
            "Token has been expired or revoked."
        );
    }

    #[test]
    fn test_extract_twilio_error() {
        let body = r#"{"code":21211,"message":"The 'To' number +65123 is not a valid phone number.","status":400}"#;
        assert_eq!(
            extract_error_message(body),
            "The 'To' number +65123 is not a valid phone number."
        );
    }

    #[test]
    fn test_extract_plain_error() {
        assert_eq!(extract_error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(extract_error_message(r#"{"foo":1}"#), r#"{"foo":1}"#);
    }
}
