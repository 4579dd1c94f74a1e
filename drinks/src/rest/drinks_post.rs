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

//! API to add a drink to the catalog.

use crate::driver::Driver;
use crate::model::{Drink, DrinkInput};
use crate::rest::{DrinksResponse, PostDrinks};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use coffee_shop_authz::Authorized;
use coffee_shop_core::rest::{RestError, parse_json_or_default};

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authorized<PostDrinks>,
    body: Bytes,
) -> Result<(StatusCode, Json<DrinksResponse<Drink>>), RestError> {
    let input = parse_json_or_default::<DrinkInput>(&body)?;
    let drink = driver.create_drink(input).await?;
    Ok((StatusCode::CREATED, Json(DrinksResponse::new(vec![drink]))))
}
