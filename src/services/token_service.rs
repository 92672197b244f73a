//! Token service - Issues, verifies and revokes signed bearer tokens.
//!
//! Tokens are HS256 JWTs carrying `{sub, exp, iat}` claims. The signing
//! secret and the revocation set are process-wide state owned by this
//! service and injected where needed; revocation is remembered only for
//! the lifetime of the process.

use std::collections::HashSet;
use std::sync::RwLock;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, TOKEN_TYPE_BEARER};
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token was issued for
    pub sub: String,
    /// Absolute expiry as a unix timestamp
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
}

/// Token pair returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    /// Short-lived JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Long-lived JWT refresh token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
}

/// Issues and validates signed, time-limited tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    revoked: RwLock<HashSet<String>>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service from application configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret_bytes()),
            access_ttl: Duration::minutes(config.access_token_expire_minutes),
            refresh_ttl: Duration::days(config.refresh_token_expire_days),
            revoked: RwLock::new(HashSet::new()),
        }
    }

    /// Issue a signed token for `subject` expiring after `ttl`.
    pub fn issue(&self, subject: &str, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Issue the access/refresh token pair handed out at login.
    pub fn issue_pair(&self, subject: &str) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(subject, self.access_ttl)?,
            refresh_token: self.issue(subject, self.refresh_ttl)?,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }

    /// Verify a token and extract its claims.
    ///
    /// Fails when the signature does not match, the expiry has passed,
    /// a required claim is absent, or the token has been revoked.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        if self.is_revoked(token) {
            return Err(AppError::Unauthorized);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation())?;
        let claims = token_data.claims;

        // Zero leeway: a token expiring this very second is already past
        // its lifetime, so a ttl of zero never validates.
        if Utc::now().timestamp() >= claims.exp {
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }

    /// Add a token to the revoked set. Re-revoking is a no-op.
    pub fn revoke(&self, token: &str) {
        self.revoked
            .write()
            .expect("revoked token set lock poisoned")
            .insert(token.to_string());
    }

    /// Check whether a token has been revoked.
    pub fn is_revoked(&self, token: &str) -> bool {
        self.revoked
            .read()
            .expect("revoked token set lock poisoned")
            .contains(token)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&Config::for_secret("test-secret-key-for-tokens-32chars!"))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue("alice", Duration::minutes(5)).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_issue_pair_carries_subject() {
        let tokens = service();
        let pair = tokens.issue_pair("alice").unwrap();

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(tokens.verify(&pair.access_token).unwrap().sub, "alice");
        assert_eq!(tokens.verify(&pair.refresh_token).unwrap().sub, "alice");
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_zero_ttl_token_is_expired() {
        let tokens = service();
        let token = tokens.issue("alice", Duration::zero()).unwrap();

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service();
        let token = tokens.issue("alice", Duration::seconds(-30)).unwrap();

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let tokens = service();
        let token = tokens.issue("alice", Duration::minutes(5)).unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(tokens.verify(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let tokens = service();
        let other =
            TokenService::new(&Config::for_secret("another-secret-key-entirely-32chars"));

        let token = tokens.issue("alice", Duration::minutes(5)).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_missing_subject_claim_is_rejected() {
        #[derive(Serialize)]
        struct BareClaims {
            exp: i64,
            iat: i64,
        }

        let config = Config::for_secret("test-secret-key-for-tokens-32chars!");
        let tokens = TokenService::new(&config);
        let now = Utc::now().timestamp();
        let bare = BareClaims {
            exp: now + 300,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &bare,
            &EncodingKey::from_secret(config.jwt_secret_bytes()),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_revoked_token_is_rejected_before_expiry() {
        let tokens = service();
        let token = tokens.issue("alice", Duration::minutes(5)).unwrap();
        assert!(tokens.verify(&token).is_ok());

        tokens.revoke(&token);
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let tokens = service();
        let token = tokens.issue("alice", Duration::minutes(5)).unwrap();

        tokens.revoke(&token);
        tokens.revoke(&token);
        assert!(tokens.is_revoked(&token));
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_revocation_is_per_token() {
        let tokens = service();
        let pair = tokens.issue_pair("alice").unwrap();

        tokens.revoke(&pair.access_token);
        assert!(tokens.verify(&pair.access_token).is_err());
        assert!(tokens.verify(&pair.refresh_token).is_ok());
    }
}
