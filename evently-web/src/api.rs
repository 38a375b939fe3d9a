use std::cell::OnceCell;

use async_trait::async_trait;
use shared::{
    auth::{AuthClient, AuthResult, GoTrueClient, SignInOutcome},
    models::Credentials,
};

use crate::config::FrontendConfig;

thread_local! {
    static SHARED_CLIENT: OnceCell<GoTrueClient> = const { OnceCell::new() };
}

/// The auth client for this page, built from [`FrontendConfig`] on first use.
///
/// # Errors
/// Returns the configuration error when the bundle was built without a usable
/// auth URL or anon key; the next call retries.
pub fn shared_client() -> AuthResult<GoTrueClient> {
    if let Some(client) = SHARED_CLIENT.with(|cell| cell.get().cloned()) {
        return Ok(client);
    }

    let config = FrontendConfig::new();
    let client = GoTrueClient::new(config.auth_url(), config.anon_key())?;
    SHARED_CLIENT.with(|cell| {
        let _ = cell.set(client.clone());
    });
    Ok(client)
}

/// Signs in through [`shared_client`].
///
/// An unusable build configuration surfaces as a faulted call, so the login
/// screen shows its generic error instead of never answering.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageAuthClient;

#[async_trait(?Send)]
impl AuthClient for PageAuthClient {
    async fn sign_in_with_password(&self, credentials: &Credentials) -> AuthResult<SignInOutcome> {
        shared_client()?.sign_in_with_password(credentials).await
    }
}
