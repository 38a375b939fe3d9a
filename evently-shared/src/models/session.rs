//! Credentials and the session issued for them.

use serde::{Deserialize, Serialize};

/// Email/password pair submitted to the password grant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email, sent as typed
    pub email: String,
    /// Account password, sent as typed
    pub password: String,
}

impl Credentials {
    /// Pairs an email with a password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The user record embedded in a token response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider user id
    pub id: String,
    /// Primary email, absent for phone-only accounts
    #[serde(default)]
    pub email: Option<String>,
}

/// Session issued by a successful password grant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token scheme, normally `bearer`
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: u64,
    /// Token used to obtain a new access token
    #[serde(default)]
    pub refresh_token: String,
    /// The signed in user
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl AuthSession {
    /// Email of the signed in user, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("a@b.com", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials_serialize_as_grant_body() {
        let json = serde_json::to_value(Credentials::new("a@b.com", "pw")).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@b.com", "password": "pw"}));
    }

    #[test]
    fn test_session_decodes_token_response() {
        let body = r#"{
            "access_token": "eyJhbGciOi",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1700000000,
            "refresh_token": "r-123",
            "user": {"id": "8f1c", "aud": "authenticated", "email": "a@b.com"}
        }"#;
        let session: AuthSession = serde_json::from_str(body).unwrap();
        assert_eq!(session.access_token, "eyJhbGciOi");
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.refresh_token, "r-123");
        assert_eq!(session.email(), Some("a@b.com"));
    }

    #[test]
    fn test_session_defaults_optional_fields() {
        let body = r#"{"access_token": "t", "user": {"id": "u"}}"#;
        let session: AuthSession = serde_json::from_str(body).unwrap();
        assert_eq!(session.token_type, "bearer");
        assert_eq!(session.expires_in, 0);
        assert!(session.refresh_token.is_empty());
        assert_eq!(session.email(), None);
    }

    #[test]
    fn test_session_debug_hides_tokens() {
        let session = AuthSession {
            access_token: "secret-access".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 60,
            refresh_token: "secret-refresh".to_string(),
            user: AuthUser {
                id: "u".to_string(),
                email: None,
            },
        };
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
    }
}
