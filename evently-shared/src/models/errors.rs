//! Error bodies returned by the auth API.

use serde::{Deserialize, Serialize};

/// Error body returned by the auth API on a non-success status.
///
/// Older GoTrue releases answer with the OAuth2 shape
/// (`error` / `error_description`), newer ones with `code` / `error_code` / `msg`.
/// Every field is optional so either generation decodes.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct ErrorResponse {
    /// Numeric status echoed in the body by newer releases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Machine readable code such as `invalid_credentials`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Human readable message (newer releases)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// OAuth2 error identifier such as `invalid_grant`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// OAuth2 human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    /// Generic message used by the REST gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Creates an error body carrying only a human readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            msg: Some(message.into()),
            ..Self::default()
        }
    }

    /// Parses an error body leniently; anything that is not a JSON object yields `None`.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Picks the most human readable message present in the body.
    ///
    /// Blank strings are treated as absent.
    #[must_use]
    pub fn human_message(&self) -> Option<String> {
        [
            &self.msg,
            &self.error_description,
            &self.message,
            &self.error,
        ]
        .into_iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(ToString::to_string)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.human_message(), &self.error_code) {
            (Some(message), Some(code)) => write!(f, "{message} ({code})"),
            (Some(message), None) => write!(f, "{message}"),
            (None, Some(code)) => write!(f, "{code}"),
            (None, None) => write!(f, "unknown auth error"),
        }
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Newer GoTrue bodies carry the message in `msg`
    #[test]
    fn test_parse_current_error_shape() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        let error = ErrorResponse::parse(body).unwrap();
        assert_eq!(error.code, Some(400));
        assert_eq!(error.error_code.as_deref(), Some("invalid_credentials"));
        assert_eq!(
            error.human_message().as_deref(),
            Some("Invalid login credentials")
        );
    }

    /// Older GoTrue bodies use the OAuth2 shape
    #[test]
    fn test_parse_oauth_error_shape() {
        let body = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
        let error = ErrorResponse::parse(body).unwrap();
        assert_eq!(error.human_message().as_deref(), Some("Email not confirmed"));
    }

    #[test]
    fn test_falls_back_to_error_identifier() {
        let body = r#"{"error":"invalid_grant"}"#;
        let error = ErrorResponse::parse(body).unwrap();
        assert_eq!(error.human_message().as_deref(), Some("invalid_grant"));
    }

    #[test]
    fn test_blank_messages_are_ignored() {
        let body = r#"{"msg":"   ","message":"Gateway rejected request"}"#;
        let error = ErrorResponse::parse(body).unwrap();
        assert_eq!(
            error.human_message().as_deref(),
            Some("Gateway rejected request")
        );
    }

    #[test]
    fn test_empty_object_has_no_message() {
        let error = ErrorResponse::parse("{}").unwrap();
        assert_eq!(error.human_message(), None);
        assert_eq!(error.to_string(), "unknown auth error");
    }

    #[test]
    fn test_non_json_body_is_rejected() {
        assert!(ErrorResponse::parse("<html>502 Bad Gateway</html>").is_none());
        assert!(ErrorResponse::parse("").is_none());
    }

    #[test]
    fn test_display_includes_code() {
        let error = ErrorResponse {
            error_code: Some("over_request_rate_limit".to_string()),
            msg: Some("Too many requests".to_string()),
            ..ErrorResponse::default()
        };
        assert_eq!(error.to_string(), "Too many requests (over_request_rate_limit)");
    }

    #[test]
    fn test_new_serializes_without_empty_fields() {
        let json = serde_json::to_string(&ErrorResponse::new("Boom")).unwrap();
        assert_eq!(json, r#"{"msg":"Boom"}"#);
    }
}
