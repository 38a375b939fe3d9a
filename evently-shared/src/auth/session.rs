//! Process-wide session state and its subscribers.
//!
//! The login screen never navigates on its own after a successful sign-in.
//! It publishes the new session here and the [`SessionObserver`] performs the
//! one navigation reset, so there is a single source of truth for "signed in".

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::login::{Navigator, Screen};
use crate::models::AuthSession;

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No session; the login screen is the entry point
    #[default]
    SignedOut,
    /// A provider issued session is active
    SignedIn(AuthSession),
}

impl AuthState {
    /// Whether a session is active.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

/// Session change delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A sign-in produced `AuthSession`
    SignedIn(AuthSession),
    /// The session ended
    SignedOut,
}

impl From<AuthEvent> for AuthState {
    fn from(event: AuthEvent) -> Self {
        match event {
            AuthEvent::SignedIn(session) => Self::SignedIn(session),
            AuthEvent::SignedOut => Self::SignedOut,
        }
    }
}

/// Reacts to session transitions published on a [`SessionHub`].
pub trait AuthStateListener {
    /// Called once for every transition, after the hub state is updated.
    fn on_auth_state_change(&self, event: &AuthEvent);
}

impl<F: Fn(&AuthEvent)> AuthStateListener for F {
    fn on_auth_state_change(&self, event: &AuthEvent) {
        self(event);
    }
}

/// Handle returned by [`SessionHub::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds the process-wide [`AuthState`] and fans transitions out to listeners.
#[derive(Default)]
pub struct SessionHub {
    state: RefCell<AuthState>,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn AuthStateListener>)>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for SessionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHub")
            .field("state", &*self.state.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl SessionHub {
    /// Creates a signed-out hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// The active session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<AuthSession> {
        match &*self.state.borrow() {
            AuthState::SignedIn(session) => Some(session.clone()),
            AuthState::SignedOut => None,
        }
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_signed_in()
    }

    /// Registers a listener for future transitions.
    #[allow(clippy::must_use_candidate)]
    pub fn subscribe(&self, listener: Rc<dyn AuthStateListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    #[allow(clippy::must_use_candidate)]
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Applies `event` and notifies listeners if the state actually changed.
    ///
    /// Returns whether a transition happened.
    #[allow(clippy::must_use_candidate)]
    pub fn publish(&self, event: AuthEvent) -> bool {
        let next = AuthState::from(event.clone());
        {
            let mut state = self.state.borrow_mut();
            if *state == next {
                debug!(signed_in = next.is_signed_in(), "auth state unchanged");
                return false;
            }
            *state = next;
        }

        // Snapshot so listeners may subscribe or unsubscribe while handling the event.
        let listeners: Vec<Rc<dyn AuthStateListener>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        debug!(
            signed_in = matches!(event, AuthEvent::SignedIn(_)),
            listeners = listeners.len(),
            "auth state changed"
        );
        for listener in listeners {
            listener.on_auth_state_change(&event);
        }
        true
    }
}

/// Drives navigation from session transitions.
///
/// Signing in resets the stack to the directory; signing out resets it to the
/// login screen.
#[derive(Debug)]
pub struct SessionObserver<N> {
    navigator: N,
}

impl<N: Navigator> SessionObserver<N> {
    /// Creates an observer that resets `navigator` on every transition.
    pub const fn new(navigator: N) -> Self {
        Self { navigator }
    }
}

impl<N: Navigator> AuthStateListener for SessionObserver<N> {
    fn on_auth_state_change(&self, event: &AuthEvent) {
        let target = match event {
            AuthEvent::SignedIn(_) => Screen::Directory,
            AuthEvent::SignedOut => Screen::Login,
        };
        self.navigator.reset_to(target);
    }
}
