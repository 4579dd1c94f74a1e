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

//! API to remove a drink from the catalog.

use crate::driver::Driver;
use crate::model::DrinkId;
use crate::rest::{DeleteDrinks, drink_id};
use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use coffee_shop_authz::Authorized;
use coffee_shop_core::rest::{EmptyBody, RestError};
use serde::Serialize;
#[cfg(test)]
use serde::Deserialize;

/// Message returned by this API on success.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct DeleteResponse {
    /// Always true.
    success: bool,

    /// Identifier of the drink that was removed.
    delete: DrinkId,
}

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authorized<DeleteDrinks>,
    path: Result<Path<DrinkId>, PathRejection>,
    _: EmptyBody,
) -> Result<Json<DeleteResponse>, RestError> {
    let id = drink_id(path)?;
    let delete = driver.delete_drink(id).await?;
    Ok(Json(DeleteResponse { success: true, delete }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use coffee_shop_authz::testutils::make_token;
    use coffee_shop_core::rest::testutils::*;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::DELETE, format!("/drinks/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let drink = context.create_drink("Latte", &[("espresso", "brown", 1)]).await;
        let other = context.create_drink("Water", &[("water", "blue", 1)]).await;

        let response = OneShotBuilder::new(context.app(), route(drink.id().as_i64()))
            .with_bearer_auth(make_token(&["delete:drinks"]))
            .send_empty()
            .await
            .expect_json::<DeleteResponse>()
            .await;
        assert_eq!(DeleteResponse { success: true, delete: *drink.id() }, response);

        assert_eq!(vec![other], context.get_drinks().await);
    }

    #[tokio::test]
    async fn test_deleted_drink_not_listed() {
        let context = TestContext::setup().await;

        let drink = context.create_drink("Latte", &[("espresso", "brown", 1)]).await;
        let other = context.create_drink("Water", &[("water", "blue", 1)]).await;

        OneShotBuilder::new(context.app(), route(drink.id().as_i64()))
            .with_bearer_auth(make_token(&["delete:drinks"]))
            .send_empty()
            .await
            .expect_status(http::StatusCode::OK)
            .verify();

        let response = OneShotBuilder::new(context.app(), (http::Method::GET, "/drinks"))
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(
            serde_json::json!({
                "success": true,
                "drinks": [{
                    "id": other.id().as_i64(),
                    "title": "Water",
                    "recipe": [{"color": "blue", "parts": 1}],
                }],
            }),
            response
        );
    }

    #[tokio::test]
    async fn test_wire_format() {
        let context = TestContext::setup().await;

        let drink = context.create_drink("Latte", &[("espresso", "brown", 1)]).await;

        let response = OneShotBuilder::new(context.app(), route(drink.id().as_i64()))
            .with_bearer_auth(make_token(&["delete:drinks"]))
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(serde_json::json!({"success": true, "delete": drink.id().as_i64()}), response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        let drink = context.create_drink("Latte", &[("espresso", "brown", 1)]).await;

        OneShotBuilder::new(context.app(), route(drink.id().as_i64()))
            .with_bearer_auth(make_token(&["delete:drinks"]))
            .send_empty()
            .await
            .expect_status(http::StatusCode::OK)
            .verify();

        OneShotBuilder::new(context.app(), route(drink.id().as_i64()))
            .with_bearer_auth(make_token(&["delete:drinks"]))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error(&format!("Drink {} not found", drink.id().as_i64()))
            .await;
    }

    #[tokio::test]
    async fn test_id_not_an_integer() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::DELETE, "/drinks/1.5"))
            .with_bearer_auth(make_token(&["delete:drinks"]))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("not found")
            .await;
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let context = TestContext::setup().await;

        let drink = context.create_drink("Latte", &[("espresso", "brown", 1)]).await;

        OneShotBuilder::new(context.app(), route(drink.id().as_i64()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Missing Authorization header")
            .await;

        assert_eq!(vec![drink], context.get_drinks().await);
    }

    #[tokio::test]
    async fn test_missing_permission() {
        let context = TestContext::setup().await;

        let drink = context.create_drink("Latte", &[("espresso", "brown", 1)]).await;

        OneShotBuilder::new(context.app(), route(drink.id().as_i64()))
            .with_bearer_auth(make_token(&["get:drink-details", "post:drinks", "patch:drinks"]))
            .send_empty()
            .await
            .expect_status(http::StatusCode::FORBIDDEN)
            .expect_error("delete:drinks not granted")
            .await;

        assert_eq!(vec![drink], context.get_drinks().await);
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(1),
        make_token(&["delete:drinks"])
    );
}
