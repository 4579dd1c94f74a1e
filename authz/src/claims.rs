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

//! Verified token contents and the permissions they grant.

use serde::{Deserialize, Serialize};

/// Subset of the claims of a verified token that services care about.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Claims {
    /// Identifier of the caller, if the issuer provided one.
    #[serde(default)]
    pub sub: Option<String>,

    /// Permission strings granted to the caller.  A missing claim grants nothing.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Claims {
    /// Returns true if these claims grant the permission `name`.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p == name)
    }
}

/// A permission that a handler can require via `Authorized<P>`.
pub trait Permission: Send + Sync + 'static {
    /// Permission string as it appears in the token's `permissions` claim.
    const NAME: &'static str;
}
