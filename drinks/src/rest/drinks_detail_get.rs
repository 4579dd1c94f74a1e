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

//! API to list all drinks with their full recipes.

use crate::driver::Driver;
use crate::model::Drink;
use crate::rest::{DrinksResponse, GetDrinkDetails};
use axum::Json;
use axum::extract::State;
use coffee_shop_authz::Authorized;
use coffee_shop_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authorized<GetDrinkDetails>,
    _: EmptyBody,
) -> Result<Json<DrinksResponse<Drink>>, RestError> {
    let drinks = driver.get_drinks().await?;
    Ok(Json(DrinksResponse::new(drinks)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use coffee_shop_authz::testutils::{make_expired_token, make_token};
    use coffee_shop_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/drinks-detail".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let latte =
            context.create_drink("Latte", &[("espresso", "brown", 1), ("milk", "white", 3)]).await;
        let water = context.create_drink("Water", &[("water", "blue", 1)]).await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .with_bearer_auth(make_token(&["get:drink-details"]))
            .send_empty()
            .await
            .expect_json::<DrinksResponse<Drink>>()
            .await;
        assert!(response.success);
        assert_eq!(vec![latte, water], response.drinks);
    }

    #[tokio::test]
    async fn test_long_form_includes_names() {
        let context = TestContext::setup().await;

        context.create_drink("Water", &[("water", "blue", 1)]).await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .with_bearer_auth(make_token(&["get:drink-details"]))
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!(
            serde_json::json!([{"name": "water", "color": "blue", "parts": 1}]),
            response["drinks"][0]["recipe"]
        );
    }

    #[tokio::test]
    async fn test_missing_token() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Missing Authorization header")
            .await;
    }

    #[tokio::test]
    async fn test_expired_token() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .with_bearer_auth(make_expired_token(&["get:drink-details"]))
            .send_empty()
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Token expired")
            .await;
    }

    #[tokio::test]
    async fn test_duplicate_authorization_header() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .with_bearer_auth(make_token(&["get:drink-details"]))
            .with_bearer_auth(make_token(&["get:drink-details"]))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .take_response()
            .await;
        assert!(response.headers().get(http::header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn test_missing_permission() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .with_bearer_auth(make_token(&["post:drinks", "patch:drinks"]))
            .send_empty()
            .await
            .expect_status(http::StatusCode::FORBIDDEN)
            .expect_error("get:drink-details not granted")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(),
        make_token(&["get:drink-details"])
    );
}
