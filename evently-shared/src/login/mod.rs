//! # Login screen
//!
//! The sign-in form state machine ([`LoginForm`]), the async driver that runs it
//! against an [`AuthClient`](crate::auth::AuthClient) ([`LoginController`]), and
//! the navigation contract both front ends implement.

pub mod controller;
pub mod form;

pub use controller::LoginController;
pub use form::{
    LoginForm, LoginState, MISSING_CREDENTIALS_MESSAGE, Resolution, SIGN_IN_FAILED_MESSAGE,
    SignInAttempt, UNEXPECTED_ERROR_MESSAGE,
};

use std::rc::Rc;
use strum::{Display, EnumIter};

/// Screens reachable from the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Screen {
    /// Email and password sign-in
    Login,
    /// Account registration
    SignUp,
    /// Post-login landing screen
    Directory,
}

/// Changes the visible screen.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    /// Pushes `screen` on top of the current history.
    fn navigate(&self, screen: Screen);

    /// Replaces the whole history with `screen`.
    fn reset_to(&self, screen: Screen);
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn navigate(&self, screen: Screen) {
        (**self).navigate(screen);
    }

    fn reset_to(&self, screen: Screen) {
        (**self).reset_to(screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_screen_names() {
        let names: Vec<String> = Screen::iter().map(|screen| screen.to_string()).collect();
        assert_eq!(names, vec!["login", "sign-up", "directory"]);
    }
}
