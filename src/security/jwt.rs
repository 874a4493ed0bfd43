/// Token issuance and verification
///
/// Tokens are self-contained: the full user record is serialized into the
/// `user_data` claim at issuance time, so later requests carry everything a
/// handler needs without a server-side session store. The embedded record is
/// a point-in-time snapshot; callers that need live state must re-query the
/// store.
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AuthError, Result};
use crate::models::User;

/// Fixed validity window for issued tokens.
pub const TOKEN_VALIDITY_MINUTES: i64 = 180;

/// JWT claims: registered claims plus the identity snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Identity snapshot, the user record serialized to JSON
    pub user_data: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Not valid before (Unix timestamp)
    pub nbf: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens.
///
/// Holds the process-wide signing configuration, constructed once at startup
/// and immutable thereafter. Rotating the key means restarting the process
/// and invalidates all previously issued unexpired tokens; no revocation
/// list is kept.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(secret: &str, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            config.jwt_audience.clone(),
        )
    }

    /// Issue a token for `user`, valid from now for [`TOKEN_VALIDITY_MINUTES`].
    pub fn issue(&self, user: &User) -> Result<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token with an explicit issuance instant.
    ///
    /// The expiry tests drive this with a shifted clock; production code goes
    /// through [`issue`](Self::issue).
    pub fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String> {
        let user_data = serde_json::to_string(user)
            .map_err(|e| AuthError::Internal(format!("Failed to serialize user claim: {}", e)))?;

        let claims = Claims {
            sub: user.id.to_string(),
            user_data,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: (issued_at + Duration::minutes(TOKEN_VALIDITY_MINUTES)).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token's signature, issuer, audience and time bounds.
    ///
    /// Every failure mode (bad signature, wrong algorithm, wrong
    /// issuer/audience, outside [nbf, exp), malformed input) maps to the same
    /// `InvalidToken` error.
    pub fn verify(&self, token: &str) -> Result<TokenData<Claims>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_nbf = true;
        // Expiry is [nbf, exp) exactly; no grace window.
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data)
    }

    /// Verify `token` and deserialize the embedded identity snapshot.
    pub fn authenticate(&self, token: &str) -> Result<User> {
        let data = self.verify(token)?;
        extract_identity(&data.claims)
    }
}

/// Deserialize the identity snapshot out of verified claims.
///
/// A payload that verified but does not deserialize to the expected shape is
/// treated the same as any other invalid token.
pub fn extract_identity(claims: &Claims) -> Result<User> {
    serde_json::from_str(&claims.user_data).map_err(|_| AuthError::InvalidToken)
}
