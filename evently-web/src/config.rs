//! Frontend configuration module
//!
//! The browser bundle has no file system or process environment, so the auth
//! endpoint and anon key are baked in at build time.

/// Frontend configuration for the auth provider
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL of the Supabase project
    pub auth_url: String,
    /// Public anon key
    pub anon_key: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            auth_url: option_env!("EVENTLY_AUTH_URL")
                .unwrap_or("http://localhost:54321")
                .to_string(),
            anon_key: option_env!("EVENTLY_ANON_KEY")
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL of the auth provider.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Public anon key sent with every auth request.
    #[must_use]
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_frontend_config_default() {
        let config = FrontendConfig::default();
        assert!(config.auth_url().starts_with("http"));
    }

    #[wasm_bindgen_test]
    fn test_frontend_config_debug() {
        let config = FrontendConfig::new();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("FrontendConfig"));
        assert!(debug_str.contains("auth_url"));
    }
}
