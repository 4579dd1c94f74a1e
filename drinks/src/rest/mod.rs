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

//! Entry point to the REST server.

use crate::driver::Driver;
use crate::model::DrinkId;
use axum::Router;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRef, Path};
use axum::http::{Method, Uri, header};
use coffee_shop_authz::{Permission, SharedVerifier};
use coffee_shop_core::rest::{RestError, RestResult};
use serde::Serialize;
#[cfg(test)]
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

mod drink_delete;
mod drink_patch;
mod drinks_detail_get;
mod drinks_get;
mod drinks_post;
#[cfg(test)]
mod testutils;

/// Permission to see the full recipe of every drink.
pub(crate) struct GetDrinkDetails;

impl Permission for GetDrinkDetails {
    const NAME: &'static str = "get:drink-details";
}

/// Permission to add drinks to the catalog.
pub(crate) struct PostDrinks;

impl Permission for PostDrinks {
    const NAME: &'static str = "post:drinks";
}

/// Permission to modify existing drinks.
pub(crate) struct PatchDrinks;

impl Permission for PatchDrinks {
    const NAME: &'static str = "patch:drinks";
}

/// Permission to remove drinks from the catalog.
pub(crate) struct DeleteDrinks;

impl Permission for DeleteDrinks {
    const NAME: &'static str = "delete:drinks";
}

/// State shared by all handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Business logic for the drinks catalog.
    driver: Driver,

    /// Verifier for the bearer tokens of gated APIs.
    verifier: SharedVerifier,
}

impl FromRef<AppState> for Driver {
    fn from_ref(state: &AppState) -> Self {
        state.driver.clone()
    }
}

impl FromRef<AppState> for SharedVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

/// Successful response carrying a list of drinks in any of their views.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize))]
pub(crate) struct DrinksResponse<T> {
    /// Always true.
    pub(crate) success: bool,

    /// The drinks affected by or returned from the request.
    pub(crate) drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    /// Creates a successful response with `drinks`.
    fn new(drinks: Vec<T>) -> Self {
        Self { success: true, drinks }
    }
}

/// Converts the result of extracting a drink id from the path into the id.
///
/// Ids that cannot be parsed can never match a drink, so they are reported as not found.
fn drink_id(path: Result<Path<DrinkId>, PathRejection>) -> RestResult<DrinkId> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(e) => Err(RestError::NotFound(format!("Drink not found: {}", e.body_text()))),
    }
}

/// Handler for requests that do not match any route.
async fn fallback(uri: Uri) -> RestError {
    RestError::NotFound(format!("Resource {} not found", uri.path()))
}

/// Creates the cross-origin policy for browser-based clients.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver, verifier: SharedVerifier) -> Router {
    use axum::routing::{get, patch};

    Router::new()
        .route("/drinks", get(drinks_get::handler).post(drinks_post::handler))
        .route("/drinks-detail", get(drinks_detail_get::handler))
        .route("/drinks/:id", patch(drink_patch::handler).delete(drink_delete::handler))
        .fallback(fallback)
        .layer(cors())
        .with_state(AppState { driver, verifier })
}
