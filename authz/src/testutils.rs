// Coffee shop drinks service
// Copyright 2026 The coffee-shop authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Test utilities to mint tokens that the test verifier accepts.

use crate::{AuthzOptions, JwtVerifier, SharedVerifier, VerificationKey};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Shared secret known by `test_verifier`.
pub const TEST_SECRET: &str = "this is the test secret";

/// Audience expected by `test_verifier`.
pub const TEST_AUDIENCE: &str = "coffee-shop-test";

/// Subject put in tokens minted by `TokenBuilder` by default.
pub const TEST_SUBJECT: &str = "test-user";

/// Returns a verifier that accepts HS256 tokens signed with `TEST_SECRET` for `TEST_AUDIENCE`.
pub fn test_verifier() -> SharedVerifier {
    let opts = AuthzOptions {
        key: VerificationKey::Hs256Secret(TEST_SECRET.to_owned()),
        audience: TEST_AUDIENCE.to_owned(),
        issuer: None,
    };
    Arc::new(JwtVerifier::new(opts).unwrap())
}

/// Raw claims as encoded in minted tokens.
#[derive(Serialize)]
struct RawClaims {
    /// Subject.
    sub: String,

    /// Audience.
    aud: String,

    /// Issuer, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<String>,

    /// Expiration time in seconds since the epoch.
    exp: u64,

    /// Granted permissions.
    permissions: Vec<String>,
}

/// Builder for signed test tokens.
#[must_use]
pub struct TokenBuilder {
    /// Secret to sign the token with.
    secret: String,

    /// Claims to put in the token.
    claims: RawClaims,
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuilder {
    /// Creates a builder for a token that `test_verifier` accepts and that grants nothing.
    pub fn new() -> Self {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        Self {
            secret: TEST_SECRET.to_owned(),
            claims: RawClaims {
                sub: TEST_SUBJECT.to_owned(),
                aud: TEST_AUDIENCE.to_owned(),
                iss: None,
                exp: now + 3600,
                permissions: vec![],
            },
        }
    }

    /// Signs the token with `secret` instead of `TEST_SECRET`.
    pub fn secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.secret = secret.into();
        self
    }

    /// Issues the token for `audience`.
    pub fn audience<S: Into<String>>(mut self, audience: S) -> Self {
        self.claims.aud = audience.into();
        self
    }

    /// Sets the issuer of the token.
    pub fn issuer<S: Into<String>>(mut self, issuer: S) -> Self {
        self.claims.iss = Some(issuer.into());
        self
    }

    /// Makes the token expire an hour ago.
    pub fn expired(mut self) -> Self {
        self.claims.exp -= 2 * 3600;
        self
    }

    /// Grants `permissions` to the token.
    pub fn permissions(mut self, permissions: &[&str]) -> Self {
        self.claims.permissions = permissions.iter().map(|p| (*p).to_owned()).collect();
        self
    }

    /// Signs the token and returns it in its compact form.
    pub fn build(self) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &self.claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .unwrap()
    }
}

/// Mints a valid token that grants `permissions`.
pub fn make_token(permissions: &[&str]) -> String {
    TokenBuilder::new().permissions(permissions).build()
}

/// Mints an expired token that grants `permissions`.
pub fn make_expired_token(permissions: &[&str]) -> String {
    TokenBuilder::new().permissions(permissions).expired().build()
}
