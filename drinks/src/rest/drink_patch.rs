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

//! API to modify the title or the recipe of a drink.

use crate::driver::Driver;
use crate::model::{Drink, DrinkId, DrinkInput};
use crate::rest::{DrinksResponse, PatchDrinks, drink_id};
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use coffee_shop_authz::Authorized;
use coffee_shop_core::model::ModelError;
use coffee_shop_core::rest::{RestError, parse_json_or_default};

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authorized<PatchDrinks>,
    path: Result<Path<DrinkId>, PathRejection>,
    body: Bytes,
) -> Result<Json<DrinksResponse<Drink>>, RestError> {
    let id = drink_id(path)?;
    let input = parse_json_or_default::<DrinkInput>(&body).map_err(|e| ModelError(e.to_string()));
    let drink = driver.update_drink(id, input).await?;
    Ok(Json(DrinksResponse::new(vec![drink])))
}
