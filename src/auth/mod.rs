//! Stateless admin tokens.
//!
//! Wire format: `<username>:<expiry-unix-seconds>.<hex hmac-sha256>`. The
//! signature covers everything before the first dot. Usernames may contain
//! colons; the expiry is always the suffix after the last colon.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::config::SecurityConfig;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("malformed token")]
    Malformed,

    #[error("token signature mismatch")]
    InvalidSignature,

    #[error("token expired")]
    Expired,
}

/// What a verified token proves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenClaims {
    pub username: String,
    pub expires_at: i64,
}

pub struct TokenAuthority {
    username: String,
    password: String,
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("username", &self.username)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            username: security.admin_username.clone(),
            password: security.admin_password.clone(),
            secret: security.admin_secret.as_bytes().to_vec(),
            ttl: i64::try_from(security.token_ttl_hours)
                .ok()
                .and_then(Duration::try_hours)
                .unwrap_or(Duration::MAX),
        }
    }

    /// Check the admin credential pair and mint a token on success.
    ///
    /// Both fields are compared in constant time and both comparisons always
    /// run, so neither which field differed nor where it differed leaks.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.password.as_bytes());

        if bool::from(user_ok & pass_ok) {
            Ok(self.issue(username))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn issue(&self, username: &str) -> String {
        self.issue_at(username, Utc::now())
    }

    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> String {
        // Saturate rather than overflow on absurd lifetimes.
        let expiry = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .timestamp();
        let payload = format!("{}:{}", username, expiry);
        let signature = self.sign(&payload);
        format!("{}.{}", payload, signature)
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AuthError> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::Malformed)?;
        if payload.is_empty() || signature.is_empty() {
            return Err(AuthError::Malformed);
        }

        let expected = self.sign(payload);
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            return Err(AuthError::InvalidSignature);
        }

        let (username, expiry) = payload.rsplit_once(':').ok_or(AuthError::Malformed)?;
        let expires_at: i64 = expiry.parse().map_err(|_| AuthError::Malformed)?;

        if now.timestamp() > expires_at {
            return Err(AuthError::Expired);
        }

        Ok(TokenClaims {
            username: username.to_string(),
            expires_at,
        })
    }

    fn sign(&self, payload: &str) -> String {
        // new_from_slice only fails for fixed-size key MACs; HMAC accepts any key length.
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret)
            .unwrap_or_else(|_| unreachable!("hmac accepts keys of any length"));
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
