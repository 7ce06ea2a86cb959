// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Signed, time-bounded bearer credentials.
//!
//! A credential is `base64url(claims) "." base64url(signature)` where the
//! claims are a JSON object and the signature is HMAC-SHA256 over the
//! encoded claims segment. Verification needs only the token and the key.

use autolot_domain::Role;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::{Duration, OffsetDateTime};

type HmacSha256 = Hmac<Sha256>;

/// Errors produced while issuing or verifying a credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// The signing secret is too short to be trusted.
    #[error("credential secret must be at least {min} bytes, got {actual}")]
    WeakSecret {
        /// Minimum accepted length.
        min: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// The token is not two base64url segments carrying JSON claims.
    #[error("malformed credential: {0}")]
    Malformed(String),
    /// The signature does not match the claims.
    #[error("credential signature mismatch")]
    BadSignature,
    /// The expiry has been reached.
    #[error("credential expired")]
    Expired,
    /// The claims could not be encoded.
    #[error("failed to encode credential: {0}")]
    Encoding(String),
}

/// The claims carried by a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the principal.
    pub sub: String,
    /// Role of the principal when the credential was issued.
    pub role: Role,
    /// Issued-at, in Unix seconds.
    pub iat: i64,
    /// Expiry, in Unix seconds. The credential is invalid from this instant on.
    pub exp: i64,
}

/// Issues and verifies credentials with a server-held key.
#[derive(Clone)]
pub struct CredentialCodec {
    key: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for CredentialCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCodec")
            .field("key", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl CredentialCodec {
    /// Shortest accepted signing secret, in bytes.
    pub const MIN_SECRET_LEN: usize = 32;

    /// Creates a codec.
    ///
    /// # Arguments
    ///
    /// * `secret` - The signing key
    /// * `ttl` - How long an issued credential stays valid
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::WeakSecret` if `secret` is shorter than
    /// [`Self::MIN_SECRET_LEN`].
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, CredentialError> {
        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(CredentialError::WeakSecret {
                min: Self::MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }
        Ok(Self {
            key: secret.to_vec(),
            ttl,
        })
    }

    /// Returns the lifetime of issued credentials.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a credential for `subject` valid from now.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded.
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, CredentialError> {
        self.issue_at(subject, role, OffsetDateTime::now_utc())
    }

    /// Issues a credential as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded.
    pub fn issue_at(
        &self,
        subject: &str,
        role: Role,
        now: OffsetDateTime,
    ) -> Result<String, CredentialError> {
        let iat: i64 = now.unix_timestamp();
        let claims: Claims = Claims {
            sub: subject.to_string(),
            role,
            iat,
            exp: iat.saturating_add(self.ttl.whole_seconds()),
        };

        let json: Vec<u8> =
            serde_json::to_vec(&claims).map_err(|e| CredentialError::Encoding(e.to_string()))?;
        let payload: String = URL_SAFE_NO_PAD.encode(json);
        let signature: Vec<u8> = self
            .mac(payload.as_bytes())?
            .finalize()
            .into_bytes()
            .to_vec();

        Ok(format!("{payload}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Verifies a credential against the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed, the signature does not
    /// match, or the credential has expired.
    pub fn verify(&self, token: &str) -> Result<Claims, CredentialError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    /// Verifies a credential as if the current time were `now`.
    ///
    /// A credential whose expiry equals `now` is already expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed, the signature does not
    /// match, or the credential has expired.
    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims, CredentialError> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| CredentialError::Malformed(String::from("missing signature")))?;

        let signature: Vec<u8> = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| CredentialError::Malformed(format!("signature: {e}")))?;
        self.mac(payload.as_bytes())?
            .verify_slice(&signature)
            .map_err(|_| CredentialError::BadSignature)?;

        let json: Vec<u8> = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| CredentialError::Malformed(format!("claims: {e}")))?;
        let claims: Claims = serde_json::from_slice(&json)
            .map_err(|e| CredentialError::Malformed(format!("claims: {e}")))?;

        if now.unix_timestamp() >= claims.exp {
            return Err(CredentialError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self, message: &[u8]) -> Result<HmacSha256, CredentialError> {
        let mut mac: HmacSha256 = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| CredentialError::Encoding(e.to_string()))?;
        mac.update(message);
        Ok(mac)
    }
}
