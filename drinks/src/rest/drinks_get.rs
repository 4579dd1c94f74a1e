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

//! API to list all drinks in their short form.

use crate::driver::Driver;
use crate::model::{Drink, DrinkId};
use crate::rest::DrinksResponse;
use axum::Json;
use axum::extract::State;
use coffee_shop_core::rest::{EmptyBody, RestError};
use serde::Serialize;
#[cfg(test)]
use serde::Deserialize;

/// Public view of an ingredient, which withholds its name.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct ShortIngredient {
    /// Color of the ingredient.
    color: String,

    /// Number of parts of the ingredient.
    parts: i64,
}

/// Public view of a drink.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct ShortDrink {
    /// Identifier of the drink.
    id: DrinkId,

    /// Title of the drink.
    title: String,

    /// Recipe of the drink without ingredient names.
    recipe: Vec<ShortIngredient>,
}

impl From<Drink> for ShortDrink {
    fn from(drink: Drink) -> Self {
        let recipe = drink
            .recipe()
            .ingredients()
            .iter()
            .map(|i| ShortIngredient { color: i.color().clone(), parts: *i.parts() })
            .collect();
        Self { id: *drink.id(), title: drink.title().as_str().to_owned(), recipe }
    }
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<Json<DrinksResponse<ShortDrink>>, RestError> {
    let drinks = driver.get_drinks().await?;
    Ok(Json(DrinksResponse::new(drinks.into_iter().map(ShortDrink::from).collect())))
}
