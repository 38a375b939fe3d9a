use shared::auth::AuthEvent;
use shared::models::AuthSession;
use yewdux::Store;

/// Global UI state mirrored from the session hub.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub session: Option<AuthSession>,
}

impl AppState {
    pub fn apply(&mut self, event: &AuthEvent) {
        self.session = match event {
            AuthEvent::SignedIn(session) => Some(session.clone()),
            AuthEvent::SignedOut => None,
        };
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.session.as_ref().and_then(AuthSession::email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::AuthUser;

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
    fn test_apply_tracks_session() {
        let mut state = AppState::default();
        assert_eq!(state.email(), None);

        state.apply(&AuthEvent::SignedIn(session()));
        assert_eq!(state.email(), Some("a@b.com"));

        state.apply(&AuthEvent::SignedOut);
        assert!(state.session.is_none());
    }
}
