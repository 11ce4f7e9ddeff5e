//! FatSecret API credentials
//!
//! Credentials come from the `FATSECRET_CLIENT_ID` and
//! `FATSECRET_CLIENT_SECRET` environment variables (a `.env` file is loaded
//! by the binary before this runs). Tests construct the config directly
//! instead of reading ambient state.

use crate::error::FatSecretError;

/// Environment variable holding the OAuth2 client id
pub const CLIENT_ID_VAR: &str = "FATSECRET_CLIENT_ID";

/// Environment variable holding the OAuth2 client secret
pub const CLIENT_SECRET_VAR: &str = "FATSECRET_CLIENT_SECRET";

/// OAuth2 client credentials for the FatSecret Platform API
#[derive(Debug, Clone)]
pub struct FatSecretConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl FatSecretConfig {
    /// Creates a config from explicit credentials
    ///
    /// Returns a `Configuration` error if either value is blank, so a
    /// misconfigured deployment fails before any token request is attempted.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, FatSecretError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.trim().is_empty() {
            return Err(FatSecretError::Configuration(format!(
                "{} is not set",
                CLIENT_ID_VAR
            )));
        }
        if client_secret.trim().is_empty() {
            return Err(FatSecretError::Configuration(format!(
                "{} is not set",
                CLIENT_SECRET_VAR
            )));
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Loads credentials from the process environment
    pub fn from_env() -> Result<Self, FatSecretError> {
        let client_id = std::env::var(CLIENT_ID_VAR).unwrap_or_default();
        let client_secret = std::env::var(CLIENT_SECRET_VAR).unwrap_or_default();
        Self::new(client_id, client_secret)
    }
}
