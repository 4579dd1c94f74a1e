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

//! Bearer token authorization for REST services.
//!
//! Services declare one marker type per permission string by implementing `Permission` and then
//! take an `Authorized<P>` argument in every handler that requires `P`.  The extractor fetches a
//! `TokenVerifier` from the router state, so tests can inject verifiers with known keys while
//! production code configures a `JwtVerifier` from the environment.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use coffee_shop_core::rest::RestError;

mod claims;
pub use claims::{Claims, Permission};
mod extract;
pub use extract::{Authorized, REALM, get_bearer_token};
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
mod verifier;
pub use verifier::{AuthzOptions, JwtVerifier, SharedVerifier, TokenVerifier, VerificationKey};

/// Authorization errors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AuthzError {
    /// Indicates that the request headers are malformed beyond a missing or bad token.
    #[error("{0}")]
    BadRequest(String),

    /// Indicates that the verification key could not be loaded.
    #[error("Invalid verification key: {0}")]
    InvalidKey(String),

    /// Indicates that the token was present but did not pass verification.
    #[error("{0}")]
    InvalidToken(String),

    /// Indicates that the verified token does not grant the required permission.
    #[error("Permission {0} not granted")]
    MissingPermission(String),

    /// Indicates that the request did not carry a usable bearer token.
    #[error("{0}")]
    MissingToken(String),
}

impl From<AuthzError> for RestError {
    fn from(e: AuthzError) -> Self {
        match e {
            AuthzError::BadRequest(_) => RestError::BadRequest(e.to_string()),
            AuthzError::InvalidKey(_) => RestError::InternalError(e.to_string()),
            AuthzError::InvalidToken(_) | AuthzError::MissingToken(_) => {
                RestError::Unauthorized { scheme: "Bearer", realm: REALM, message: e.to_string() }
            }
            AuthzError::MissingPermission(_) => RestError::Forbidden(e.to_string()),
        }
    }
}

/// Result type for this crate.
pub type AuthzResult<T> = Result<T, AuthzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authz_error_to_rest_error() {
        assert_eq!(
            RestError::Unauthorized {
                scheme: "Bearer",
                realm: REALM,
                message: "Token expired".to_owned()
            },
            RestError::from(AuthzError::InvalidToken("Token expired".to_owned()))
        );
        assert_eq!(
            RestError::Forbidden("Permission post:drinks not granted".to_owned()),
            RestError::from(AuthzError::MissingPermission("post:drinks".to_owned()))
        );
        assert_eq!(
            RestError::InternalError("Invalid verification key: bad".to_owned()),
            RestError::from(AuthzError::InvalidKey("bad".to_owned()))
        );
        assert_eq!(
            RestError::BadRequest("Duplicate header".to_owned()),
            RestError::from(AuthzError::BadRequest("Duplicate header".to_owned()))
        );
    }
}
