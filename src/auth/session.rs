// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session-token decoding.
//!
//! Session tokens are HS256 JWTs signed by the frontend's identity provider.
//! The verification key is not the shared secret itself: it is derived with
//! HKDF-SHA256 using the cookie name as salt, matching how the provider
//! derives its signing key. A token minted for a differently named cookie
//! therefore never verifies here, even with the same secret.

use hmac::{Hmac, Mac};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Well-known name of the session cookie; doubles as the key-derivation salt.
pub const SESSION_COOKIE: &str = "authjs.session-token";

/// Context string bound into the derived key.
const KEY_INFO: &str = "storefront session token";

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Payload recovered from a verified session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user's primary key. Optional because a structurally
    /// valid token may still lack it; that case is rejected separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration timestamp, enforced during verification.
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Derive the 32-byte session verification key from the shared secret.
///
/// HKDF-SHA256: extract with the salt, then a single expand block over
/// [`KEY_INFO`]. One block is exactly the 32 bytes HS256 needs.
pub fn derive_session_key(secret: &str, salt: &str) -> [u8; 32] {
    let mut extract =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC accepts keys of any length");
    extract.update(secret.as_bytes());
    let prk = extract.finalize().into_bytes();

    let mut expand =
        HmacSha256::new_from_slice(prk.as_slice()).expect("HMAC accepts keys of any length");
    expand.update(KEY_INFO.as_bytes());
    expand.update(&[0x01]);
    expand.finalize().into_bytes().into()
}

/// Verifies session tokens against the derived key.
#[derive(Clone)]
pub struct SessionDecoder {
    key: [u8; 32],
}

impl SessionDecoder {
    /// Build a decoder for the given shared secret, salted with the session
    /// cookie name.
    pub fn new(secret: &str) -> Self {
        Self {
            key: derive_session_key(secret, SESSION_COOKIE),
        }
    }

    /// Decode and verify a session token.
    ///
    /// Rejects bad signatures, malformed structure, and expired tokens
    /// (with clock-skew leeway). A present-but-empty `sub` is not this
    /// layer's concern; callers inspect the claims.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&self.key), &validation)?;
        Ok(data.claims)
    }
}

/// Mint a signed session token for tests.
#[cfg(test)]
pub(crate) fn mint_session_token(secret: &str, claims: &SessionClaims) -> String {
    let key = jsonwebtoken::EncodingKey::from_secret(&derive_session_key(secret, SESSION_COOKIE));
    jsonwebtoken::encode(&jsonwebtoken::Header::new(Algorithm::HS256), claims, &key)
        .expect("encode test token")
}
