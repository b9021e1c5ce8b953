//! JWT token handling
//!
//! Tokens are stateless HS256 JWTs carrying the user id as `sub`.
//! Nothing is persisted; validity is signature + `exp` + `iss`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime: 3 days
pub const DEFAULT_EXPIRATION_HOURS: i64 = 72;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Process-wide signing secret
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: DEFAULT_EXPIRATION_HOURS,
            issuer: "jobboard".to_string(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

/// Create a signed token for a user
pub fn create_token(
    user_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        &TokenClaims::new(user_id, config),
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry and issuer, then return the claims
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}
