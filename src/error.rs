//! Error types shared by the FatSecret API clients
//!
//! All three API clients and the token manager talk to the same upstream
//! service, so they share one error enum instead of per-client variants.

use thiserror::Error;

/// Errors that can occur when talking to the FatSecret Platform API
#[derive(Debug, Error)]
pub enum FatSecretError {
    /// Client credentials are missing or empty
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream service returned a non-success response
    #[error("FatSecret API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to decode a JSON response body
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_message() {
        let err = FatSecretError::Configuration("FATSECRET_CLIENT_ID is not set".to_string());
        assert!(err.to_string().contains("FATSECRET_CLIENT_ID"));
    }

    #[test]
    fn test_upstream_error_includes_status_and_message() {
        let err = FatSecretError::Upstream {
            status: 401,
            message: "invalid_client".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("invalid_client"));
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err = FatSecretError::from(serde_err);
        assert!(matches!(err, FatSecretError::Decode(_)));
    }
}
