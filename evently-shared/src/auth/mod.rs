//! # Authentication
//!
//! The collaborator contract for credential sign-in, the GoTrue HTTP
//! implementation of it, and the process-wide session hub.

pub mod gotrue;
pub mod session;

pub use gotrue::GoTrueClient;
pub use session::{AuthEvent, AuthState, AuthStateListener, SessionHub, SessionObserver, SubscriptionId};

use crate::models::{AuthSession, Credentials};
use async_trait::async_trait;
use thiserror::Error;

/// Result type alias for auth client operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Faults raised by an auth client instead of a structured outcome.
///
/// A rejected password is not a fault; it is a [`SignInOutcome::Failure`].
#[derive(Error, Debug)]
pub enum AuthError {
    /// The request never produced a response
    #[error("auth request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response could not be decoded
    #[error("auth response could not be decoded: {message}")]
    Decode {
        /// What failed to decode
        message: String,
    },

    /// The client was built from unusable settings
    #[error("invalid auth configuration: {message}")]
    InvalidConfiguration {
        /// Which setting is unusable
        message: String,
    },
}

impl AuthError {
    /// Creates an [`AuthError::Decode`].
    #[must_use]
    pub fn decode<T: Into<String>>(message: T) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an [`AuthError::InvalidConfiguration`].
    #[must_use]
    pub fn invalid_configuration<T: Into<String>>(message: T) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Structured result of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The provider issued a session
    Success(AuthSession),
    /// The provider rejected the attempt, optionally saying why
    Failure {
        /// Provider message; `None` when the body carried none
        message: Option<String>,
    },
}

impl SignInOutcome {
    /// A rejection carrying `message`.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: Some(message.into()),
        }
    }

    /// Whether a session was issued.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Credential based sign-in against an external identity provider.
///
/// Implementations run on a single cooperative event loop (the browser or a
/// current-thread runtime), so futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait AuthClient {
    /// Attempt a password sign-in.
    ///
    /// # Errors
    /// Returns an [`AuthError`] when the call faults before a structured
    /// outcome is available (network failure, undecodable response).
    async fn sign_in_with_password(&self, credentials: &Credentials) -> AuthResult<SignInOutcome>;
}

#[async_trait(?Send)]
impl<C: AuthClient + ?Sized> AuthClient for std::rc::Rc<C> {
    async fn sign_in_with_password(&self, credentials: &Credentials) -> AuthResult<SignInOutcome> {
        (**self).sign_in_with_password(credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_helper_sets_message() {
        assert_eq!(
            SignInOutcome::failure("Invalid login credentials"),
            SignInOutcome::Failure {
                message: Some("Invalid login credentials".to_string())
            }
        );
        assert!(!SignInOutcome::Failure { message: None }.is_success());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AuthError::decode("missing access_token").to_string(),
            "auth response could not be decoded: missing access_token"
        );
        assert_eq!(
            AuthError::invalid_configuration("empty anon key").to_string(),
            "invalid auth configuration: empty anon key"
        );
    }
}
