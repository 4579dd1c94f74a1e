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

//! Axum extractor that gates handlers on a permission.

use crate::{AuthzError, AuthzResult, Claims, Permission, SharedVerifier};
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use coffee_shop_core::rest::{RestError, get_unique_header};
use log::debug;
use std::marker::PhantomData;

/// Realm reported in `WWW-Authenticate` challenges.
pub const REALM: &str = "coffee-shop";

/// Validates that the `Authorization` header in `headers` carries a bearer token and returns it.
pub fn get_bearer_token(headers: &HeaderMap) -> AuthzResult<&str> {
    let authz = match get_unique_header(headers, "Authorization") {
        Ok(Some(value)) => value,
        Ok(None) => return Err(AuthzError::MissingToken("Missing Authorization header".to_owned())),
        Err(e) => return Err(AuthzError::BadRequest(e.to_string())),
    };

    let authz = authz.to_str().map_err(|e| {
        AuthzError::MissingToken(format!("Bad encoding in Authorization header: {}", e))
    })?;

    let mut fields = authz.splitn(2, ' ');
    let scheme = match fields.next() {
        Some(s) if !s.is_empty() => s,
        _ => {
            return Err(AuthzError::MissingToken(
                "Bad Authorization header: missing scheme".to_owned(),
            ));
        }
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthzError::MissingToken(format!(
            "Unsupported authorization scheme {}",
            scheme
        )));
    }

    match fields.next().map(str::trim) {
        Some(token) if !token.is_empty() && !token.contains(' ') => Ok(token),
        Some(token) if !token.is_empty() => Err(AuthzError::MissingToken(
            "Bad Authorization header: token must be a single word".to_owned(),
        )),
        _ => Err(AuthzError::MissingToken("Bad Authorization header: missing token".to_owned())),
    }
}

/// Extractor that only lets requests through if they carry a valid token granting `P`.
///
/// The router state must provide a `SharedVerifier` via `FromRef`.
pub struct Authorized<P: Permission> {
    /// Verified claims of the caller.
    claims: Claims,

    /// Marker for the permission checked by this extractor.
    _permission: PhantomData<fn() -> P>,
}

impl<P: Permission> Authorized<P> {
    /// Returns the verified claims of the caller.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

#[async_trait]
impl<P, S> FromRequestParts<S> for Authorized<P>
where
    P: Permission,
    S: Send + Sync,
    SharedVerifier: FromRef<S>,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = SharedVerifier::from_ref(state);

        let result = get_bearer_token(&parts.headers).and_then(|token| verifier.verify(token));
        let claims = match result {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Rejecting request to {}: {}", parts.uri.path(), e);
                return Err(e.into());
            }
        };

        if !claims.has_permission(P::NAME) {
            debug!("Rejecting request to {}: missing {}", parts.uri.path(), P::NAME);
            return Err(AuthzError::MissingPermission(P::NAME.to_owned()).into());
        }

        Ok(Authorized { claims, _permission: PhantomData })
    }
}
