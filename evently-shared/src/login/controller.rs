//! Async driver for the login form.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::auth::{AuthClient, AuthEvent, SessionHub};
use crate::login::form::{LoginForm, LoginState, Resolution};
use crate::login::{Navigator, Screen};

/// Runs a [`LoginForm`] against an auth client.
///
/// Successful sign-ins are published on the [`SessionHub`]; navigating to the
/// landing screen is left to whichever observer is subscribed there.
pub struct LoginController<C, N> {
    form: RefCell<LoginForm>,
    client: C,
    navigator: N,
    sessions: Rc<SessionHub>,
    on_change: RefCell<Option<Rc<dyn Fn(&LoginState)>>>,
}

impl<C, N> std::fmt::Debug for LoginController<C, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginController")
            .field("form", &self.form.borrow().state())
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

impl<C: AuthClient, N: Navigator> LoginController<C, N> {
    /// Wires a fresh form to `client`, `navigator` and `sessions`.
    #[must_use]
    pub fn new(client: C, navigator: N, sessions: Rc<SessionHub>) -> Self {
        Self {
            form: RefCell::new(LoginForm::new()),
            client,
            navigator,
            sessions,
            on_change: RefCell::new(None),
        }
    }

    /// Registers `callback` to run whenever [`submit`](Self::submit) moves the
    /// form to a new state. Replaces any earlier callback.
    pub fn set_on_change(&self, callback: impl Fn(&LoginState) + 'static) {
        *self.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    fn notify(&self) {
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback(&self.state());
        }
    }

    /// Replaces the email field.
    pub fn set_email(&self, email: impl Into<String>) {
        self.form.borrow_mut().set_email(email);
    }

    /// Replaces the password field.
    pub fn set_password(&self, password: impl Into<String>) {
        self.form.borrow_mut().set_password(password);
    }

    /// Current email field.
    #[must_use]
    pub fn email(&self) -> String {
        self.form.borrow().email().to_string()
    }

    /// Current password field.
    #[must_use]
    pub fn password(&self) -> String {
        self.form.borrow().password().to_string()
    }

    /// What the screen should currently show.
    #[must_use]
    pub fn state(&self) -> LoginState {
        self.form.borrow().state()
    }

    /// Message of the last failed attempt or validation.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.form.borrow().error_message().map(ToString::to_string)
    }

    /// Whether an attempt is outstanding.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.form.borrow().is_submitting()
    }

    /// Whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.form.borrow().can_submit()
    }

    /// Submits the current fields.
    ///
    /// At most one auth call is outstanding per controller; calling this while
    /// one is in flight returns immediately without contacting the client.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> LoginState {
        let attempt = self.form.borrow_mut().begin_submit();
        self.notify();
        let Some(attempt) = attempt else {
            return self.state();
        };

        debug!(attempt = attempt.id(), "signing in");
        let result = self
            .client
            .sign_in_with_password(attempt.credentials())
            .await;

        let resolution = self.form.borrow_mut().resolve(&attempt, result);
        match resolution {
            Resolution::SignedIn(session) => {
                self.sessions.publish(AuthEvent::SignedIn(session));
                self.notify();
            }
            Resolution::Discarded => {}
            Resolution::Rejected | Resolution::Faulted => self.notify(),
        }
        self.state()
    }

    /// Goes to the landing screen without signing in.
    pub fn continue_as_guest(&self) {
        self.navigator.navigate(Screen::Directory);
    }

    /// Opens the registration screen.
    pub fn go_to_sign_up(&self) {
        self.navigator.navigate(Screen::SignUp);
    }

    /// Marks the screen as unmounted; an outstanding result will be ignored.
    pub fn tear_down(&self) {
        self.form.borrow_mut().tear_down();
    }
}
