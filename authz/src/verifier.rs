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

//! Token verification.

use crate::{AuthzError, AuthzResult, Claims};
use coffee_shop_core::env::{get_optional_var, get_required_var};
use derivative::Derivative;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::sync::Arc;

/// Checks bearer tokens and returns the claims they carry.
pub trait TokenVerifier {
    /// Verifies the raw `token` and returns its claims if it is valid.
    fn verify(&self, token: &str) -> AuthzResult<Claims>;
}

/// Verifier type as held in router states.
pub type SharedVerifier = Arc<dyn TokenVerifier + Send + Sync>;

/// Key material used to check token signatures.
#[derive(Clone, PartialEq)]
pub enum VerificationKey {
    /// Public key in PEM format for RS256-signed tokens.
    RsaPublicKeyPem(String),

    /// Shared secret for HS256-signed tokens.
    Hs256Secret(String),
}

/// Configuration for the `JwtVerifier`.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct AuthzOptions {
    /// Key to verify token signatures with.
    #[derivative(Debug = "ignore")]
    pub key: VerificationKey,

    /// Audience that tokens must be issued for.
    pub audience: String,

    /// Issuer that tokens must come from, if any.
    pub issuer: Option<String>,
}

impl AuthzOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_AUDIENCE`, `<prefix>_ISSUER` and exactly one of
    /// `<prefix>_RSA_PUBLIC_KEY` or `<prefix>_HS256_SECRET`.
    pub fn from_env(prefix: &str) -> Result<AuthzOptions, String> {
        let rsa = get_optional_var::<String>(prefix, "RSA_PUBLIC_KEY")?;
        let secret = get_optional_var::<String>(prefix, "HS256_SECRET")?;
        let key = match (rsa, secret) {
            (Some(pem), None) => VerificationKey::RsaPublicKeyPem(pem),
            (None, Some(secret)) => VerificationKey::Hs256Secret(secret),
            (None, None) => {
                return Err(format!(
                    "One of {}_RSA_PUBLIC_KEY or {}_HS256_SECRET must be set",
                    prefix, prefix
                ));
            }
            (Some(_), Some(_)) => {
                return Err(format!(
                    "{}_RSA_PUBLIC_KEY and {}_HS256_SECRET are mutually exclusive",
                    prefix, prefix
                ));
            }
        };
        Ok(AuthzOptions {
            key,
            audience: get_required_var::<String>(prefix, "AUDIENCE")?,
            issuer: get_optional_var::<String>(prefix, "ISSUER")?,
        })
    }
}

/// Verifier for signed JWTs.
pub struct JwtVerifier {
    /// Key to check signatures with.
    key: DecodingKey,

    /// Rules that the token header and registered claims must satisfy.
    validation: Validation,
}

impl JwtVerifier {
    /// Creates a new verifier from `opts`.
    pub fn new(opts: AuthzOptions) -> AuthzResult<Self> {
        let (key, algorithm) = match opts.key {
            VerificationKey::RsaPublicKeyPem(pem) => {
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AuthzError::InvalidKey(e.to_string()))?;
                (key, Algorithm::RS256)
            }
            VerificationKey::Hs256Secret(secret) => {
                if secret.is_empty() {
                    return Err(AuthzError::InvalidKey("Secret cannot be empty".to_owned()));
                }
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[opts.audience]);
        if let Some(issuer) = opts.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { key, validation })
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> AuthzResult<Claims> {
        match jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => {
                    Err(AuthzError::InvalidToken("Token expired".to_owned()))
                }
                _ => Err(AuthzError::InvalidToken(format!("Invalid token: {}", e))),
            },
        }
    }
}
