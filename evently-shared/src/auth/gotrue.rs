//! Password sign-in against a Supabase GoTrue endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{instrument, warn};
use url::Url;

use crate::auth::{AuthClient, AuthError, AuthResult, SignInOutcome};
use crate::models::{AuthSession, Credentials, ErrorResponse};

const API_PREFIX: &str = "auth/v1";
const APIKEY_HEADER: &str = "apikey";

/// HTTP client for the GoTrue REST API.
#[derive(Clone, Debug)]
pub struct GoTrueClient {
    base_url: String,
    anon_key: String,
    client: Client,
}

impl GoTrueClient {
    /// Create a client for the project at `auth_url` using its public anon key.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidConfiguration`] when the URL is not an
    /// absolute http(s) URL or the key is blank.
    pub fn new(auth_url: &str, anon_key: impl Into<String>) -> AuthResult<Self> {
        Self::with_client(auth_url, anon_key, Client::new())
    }

    /// Same as [`GoTrueClient::new`] with a caller supplied [`Client`].
    ///
    /// # Errors
    /// See [`GoTrueClient::new`].
    pub fn with_client(
        auth_url: &str,
        anon_key: impl Into<String>,
        client: Client,
    ) -> AuthResult<Self> {
        let parsed = Url::parse(auth_url)
            .map_err(|err| AuthError::invalid_configuration(format!("auth url: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AuthError::invalid_configuration(format!(
                "auth url must be http or https, got {}",
                parsed.scheme()
            )));
        }

        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(AuthError::invalid_configuration("anon key is empty"));
        }

        Ok(Self {
            base_url: auth_url.trim_end_matches('/').to_string(),
            anon_key,
            client,
        })
    }

    /// Project URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            API_PREFIX,
            path.trim_start_matches('/')
        )
    }

    /// Endpoint of the password grant.
    #[must_use]
    pub fn token_url(&self) -> String {
        self.api_url("token?grant_type=password")
    }

    /// Revoke the session behind `access_token`.
    ///
    /// An already expired token (401) counts as signed out.
    ///
    /// # Errors
    /// Returns [`AuthError::Transport`] when the request cannot be sent or
    /// the rejection body cannot be read.
    #[instrument(skip_all)]
    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(self.api_url("logout"))
            .header(APIKEY_HEADER, &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::UNAUTHORIZED {
            let body = response.text().await?;
            warn!(%status, body = %body, "sign-out rejected");
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthClient for GoTrueClient {
    #[instrument(skip_all)]
    async fn sign_in_with_password(&self, credentials: &Credentials) -> AuthResult<SignInOutcome> {
        let response = self
            .client
            .post(self.token_url())
            .header(APIKEY_HEADER, &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let session: AuthSession = response
                .json()
                .await
                .map_err(|err| AuthError::decode(err.to_string()))?;
            return Ok(SignInOutcome::Success(session));
        }

        let body = response.text().await?;
        let message = ErrorResponse::parse(&body).and_then(|error| error.human_message());
        warn!(%status, "password grant rejected");
        Ok(SignInOutcome::Failure { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_url() {
        let client = GoTrueClient::new("https://project.supabase.co/", "anon").unwrap();
        assert_eq!(client.base_url(), "https://project.supabase.co");
        assert_eq!(
            client.token_url(),
            "https://project.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn test_api_url_keeps_base_path() {
        let client = GoTrueClient::new("http://localhost:54321/gateway", "anon").unwrap();
        assert_eq!(
            client.api_url("/logout"),
            "http://localhost:54321/gateway/auth/v1/logout"
        );
    }

    #[test]
    fn test_rejects_relative_url() {
        let err = GoTrueClient::new("project.supabase.co", "anon").unwrap_err();
        assert!(matches!(err, AuthError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = GoTrueClient::new("ftp://project.supabase.co", "anon").unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_rejects_blank_key() {
        let err = GoTrueClient::new("https://project.supabase.co", "  ").unwrap_err();
        assert!(err.to_string().contains("anon key is empty"));
    }
}
