//! Authentication configuration module

use serde::{Deserialize, Serialize};

/// JWT configuration for the API surface
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret used to verify bearer tokens
    pub jwt_secret: String,

    /// Expected token issuer
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("change-me-in-production"),
            issuer: default_issuer(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| default_issuer()),
        }
    }
}

fn default_issuer() -> String {
    String::from("servigo")
}
