//! OAuth2 authentication for the FatSecret Platform API
//!
//! FatSecret uses the client-credentials grant: the client id/secret pair is
//! exchanged directly for a short-lived bearer token. The token manager here
//! caches that token and refreshes it ahead of expiry.

mod token;

pub use token::{AccessToken, TokenManager};
