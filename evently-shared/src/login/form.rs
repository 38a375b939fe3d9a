//! Sign-in form state.
//!
//! `LoginForm` is a plain state machine with no I/O. A submission is split in
//! two phases, [`LoginForm::begin_submit`] and [`LoginForm::resolve`], so a UI
//! can release its borrow of the form while the auth call is outstanding.

use tracing::{debug, error};

use crate::auth::{AuthError, SignInOutcome};
use crate::models::{AuthSession, Credentials};

/// Shown when either field is empty.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter both email and password.";
/// Shown when the provider rejects the attempt without a message.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Failed to sign in.";
/// Shown when the auth call faults.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// What the screen should currently look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for input
    Idle,
    /// An attempt is outstanding
    Submitting,
    /// Waiting for input, showing the message of the last attempt
    IdleWithError(String),
    /// Sign-in succeeded; the screen is about to be replaced.
    Navigated,
}

/// An accepted submission awaiting its auth result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInAttempt {
    id: u64,
    credentials: Credentials,
}

impl SignInAttempt {
    /// Sequence number of the attempt within its form.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The values captured when the attempt was accepted.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// How an auth result was applied to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The provider issued a session; hand it to the session hub.
    SignedIn(AuthSession),
    /// The provider rejected the attempt; the error message is set.
    Rejected,
    /// The call faulted; the generic error message is set.
    Faulted,
    /// The result arrived for a stale attempt or after tear-down and was ignored.
    Discarded,
}

/// Field values and submission bookkeeping of the login screen.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    email: String,
    password: String,
    submitting: bool,
    error: Option<String>,
    attempts: u64,
    navigated: bool,
    torn_down: bool,
}

impl LoginForm {
    /// An empty, idle form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current email field.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current password field.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Replaces the email field.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Replaces the password field.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Whether an attempt is outstanding.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message of the last failed attempt or validation.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the screen has been unmounted.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether the submit action should be offered.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.submitting && !self.navigated && !self.torn_down
    }

    /// What the screen should currently show.
    #[must_use]
    pub fn state(&self) -> LoginState {
        if self.navigated {
            LoginState::Navigated
        } else if self.submitting {
            LoginState::Submitting
        } else if let Some(message) = &self.error {
            LoginState::IdleWithError(message.clone())
        } else {
            LoginState::Idle
        }
    }

    /// Starts a submission.
    ///
    /// Returns `None` without touching the form while a submission is in
    /// flight, after navigation or after tear-down. Returns `None` with the
    /// error message set when a field is empty. Otherwise marks the form as
    /// submitting and returns the attempt whose credentials must be sent.
    pub fn begin_submit(&mut self) -> Option<SignInAttempt> {
        if !self.can_submit() {
            debug!(
                submitting = self.submitting,
                torn_down = self.torn_down,
                "ignoring submit"
            );
            return None;
        }

        self.error = None;
        if self.email.is_empty() || self.password.is_empty() {
            self.error = Some(MISSING_CREDENTIALS_MESSAGE.to_string());
            return None;
        }

        self.attempts += 1;
        self.submitting = true;
        Some(SignInAttempt {
            id: self.attempts,
            credentials: Credentials::new(self.email.clone(), self.password.clone()),
        })
    }

    /// Applies the auth result of `attempt`.
    ///
    /// The submitting flag is cleared on every path except a discarded one.
    /// A blank provider message counts as absent and shows the fallback.
    pub fn resolve(
        &mut self,
        attempt: &SignInAttempt,
        result: Result<SignInOutcome, AuthError>,
    ) -> Resolution {
        if self.torn_down || !self.submitting || attempt.id != self.attempts {
            debug!(attempt = attempt.id, "discarding sign-in result");
            return Resolution::Discarded;
        }
        self.submitting = false;

        match result {
            Ok(SignInOutcome::Success(session)) => {
                self.navigated = true;
                Resolution::SignedIn(session)
            }
            Ok(SignInOutcome::Failure { message }) => {
                let message = message
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| SIGN_IN_FAILED_MESSAGE.to_string());
                debug!(attempt = attempt.id, email = %attempt.credentials.email, "sign-in rejected");
                error!(error = %message, "sign-in error");
                self.error = Some(message);
                Resolution::Rejected
            }
            Err(err) => {
                debug!(attempt = attempt.id, email = %attempt.credentials.email, "sign-in faulted");
                error!(error = %err, "unexpected sign-in error");
                self.error = Some(UNEXPECTED_ERROR_MESSAGE.to_string());
                Resolution::Faulted
            }
        }
    }

    /// Marks the screen as unmounted; later results are discarded.
    pub fn tear_down(&mut self) {
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;
    use std::sync::{Arc, Mutex};

    fn filled(email: &str, password: &str) -> LoginForm {
        let mut form = LoginForm::new();
        form.set_email(email);
        form.set_password(password);
        form
    }

    fn session() -> AuthSession {
        AuthSession {
            access_token: "token".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            refresh_token: "refresh".to_string(),
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("a@b.com".to_string()),
            },
        }
    }

    #[test]
    fn test_new_form_is_idle() {
        let form = LoginForm::new();
        assert_eq!(form.state(), LoginState::Idle);
        assert!(form.can_submit());
        assert!(form.error_message().is_none());
    }

    #[test]
    fn test_empty_fields_set_validation_error() {
        for (email, password) in [("", "x"), ("a@b.com", ""), ("", "")] {
            let mut form = filled(email, password);
            assert!(form.begin_submit().is_none());
            assert_eq!(form.error_message(), Some(MISSING_CREDENTIALS_MESSAGE));
            assert!(!form.is_submitting());
        }
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let mut form = filled(" ", " ");
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_begin_submit_captures_exact_credentials() {
        let mut form = filled("a@b.com", "pw");
        let attempt = form.begin_submit().unwrap();
        assert_eq!(attempt.credentials(), &Credentials::new("a@b.com", "pw"));
        assert_eq!(form.state(), LoginState::Submitting);
        assert!(!form.can_submit());
    }

    #[test]
    fn test_begin_submit_is_noop_while_submitting() {
        let mut form = filled("a@b.com", "pw");
        form.begin_submit().unwrap();
        form.set_email("");
        assert!(form.begin_submit().is_none());
        assert!(form.error_message().is_none());
        assert!(form.is_submitting());
    }

    #[test]
    fn test_new_attempt_clears_previous_error() {
        let mut form = filled("", "x");
        form.begin_submit();
        assert!(form.error_message().is_some());

        form.set_email("a@b.com");
        form.begin_submit().unwrap();
        assert!(form.error_message().is_none());
    }

    #[test]
    fn test_failure_message_is_shown_verbatim() {
        let mut form = filled("a@b.com", "pw");
        let attempt = form.begin_submit().unwrap();
        let resolution = form.resolve(
            &attempt,
            Ok(SignInOutcome::failure("Invalid login credentials")),
        );
        assert_eq!(resolution, Resolution::Rejected);
        assert_eq!(
            form.state(),
            LoginState::IdleWithError("Invalid login credentials".to_string())
        );
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let mut form = filled("a@b.com", "pw");
        let attempt = form.begin_submit().unwrap();
        form.resolve(&attempt, Ok(SignInOutcome::Failure { message: None }));
        assert_eq!(form.error_message(), Some(SIGN_IN_FAILED_MESSAGE));

        let attempt = form.begin_submit().unwrap();
        form.resolve(
            &attempt,
            Ok(SignInOutcome::Failure {
                message: Some(String::new()),
            }),
        );
        assert_eq!(form.error_message(), Some(SIGN_IN_FAILED_MESSAGE));

        let attempt = form.begin_submit().unwrap();
        form.resolve(
            &attempt,
            Ok(SignInOutcome::Failure {
                message: Some("  \n".to_string()),
            }),
        );
        assert_eq!(form.error_message(), Some(SIGN_IN_FAILED_MESSAGE));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_error_logs_leave_out_the_email() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut form = filled("ada@example.com", "pw");
            let attempt = form.begin_submit().unwrap();
            form.resolve(&attempt, Ok(SignInOutcome::failure("Invalid login credentials")));
            let attempt = form.begin_submit().unwrap();
            form.resolve(&attempt, Err(AuthError::decode("truncated body")));
        });

        let text = logs.text();
        assert!(text.contains("Invalid login credentials"), "{text}");
        assert!(text.contains("truncated body"), "{text}");
        assert!(!text.contains("ada@example.com"), "{text}");
    }

    #[test]
    fn test_fault_uses_generic_message() {
        let mut form = filled("a@b.com", "pw");
        let attempt = form.begin_submit().unwrap();
        let resolution = form.resolve(&attempt, Err(AuthError::decode("truncated body")));
        assert_eq!(resolution, Resolution::Faulted);
        assert_eq!(form.error_message(), Some(UNEXPECTED_ERROR_MESSAGE));
        assert!(!form.is_submitting());
        assert!(form.can_submit());
    }

    #[test]
    fn test_success_is_terminal() {
        let mut form = filled("a@b.com", "pw");
        let attempt = form.begin_submit().unwrap();
        let resolution = form.resolve(&attempt, Ok(SignInOutcome::Success(session())));
        assert_eq!(resolution, Resolution::SignedIn(session()));
        assert_eq!(form.state(), LoginState::Navigated);
        assert!(form.error_message().is_none());
        assert!(!form.is_submitting());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_result_after_tear_down_is_discarded() {
        let mut form = filled("a@b.com", "pw");
        let attempt = form.begin_submit().unwrap();
        form.tear_down();
        let resolution = form.resolve(&attempt, Ok(SignInOutcome::Success(session())));
        assert_eq!(resolution, Resolution::Discarded);
        assert_ne!(form.state(), LoginState::Navigated);
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_stale_attempt_is_discarded() {
        let mut form = filled("a@b.com", "pw");
        let first = form.begin_submit().unwrap();
        form.resolve(&first, Ok(SignInOutcome::Failure { message: None }));
        let second = form.begin_submit().unwrap();

        assert_eq!(
            form.resolve(&first, Ok(SignInOutcome::Success(session()))),
            Resolution::Discarded
        );
        assert!(form.is_submitting());
        assert_eq!(
            form.resolve(&second, Ok(SignInOutcome::failure("nope"))),
            Resolution::Rejected
        );
    }
}
