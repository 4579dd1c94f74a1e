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

//! Operations on the drinks catalog.

use crate::db;
use crate::driver::Driver;
use crate::model::{Drink, DrinkId, DrinkInput, Recipe, Title};
use coffee_shop_core::db::DbError;
use coffee_shop_core::driver::{DriverError, DriverResult};
use coffee_shop_core::model::ModelResult;

/// Converts `e` into a driver error that names the drink `id`.
fn drink_error(e: DbError, id: DrinkId) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(format!("Drink {} not found", id.as_i64())),
        e => e.into(),
    }
}

/// Converts `e` into a driver error that names the conflicting `title`.
fn title_error(e: DbError, title: &str) -> DriverError {
    match e {
        DbError::AlreadyExists => {
            DriverError::AlreadyExists(format!("A drink titled '{}' already exists", title))
        }
        e => e.into(),
    }
}

impl Driver {
    /// Gets all drinks in the catalog, ordered by id.
    pub(crate) async fn get_drinks(self) -> DriverResult<Vec<Drink>> {
        let drinks = db::get_drinks(&mut self.db.ex().await?).await?;
        Ok(drinks)
    }

    /// Validates `input` and adds it to the catalog as a new drink.
    pub(crate) async fn create_drink(self, input: DrinkInput) -> DriverResult<Drink> {
        let (title, recipe) = match (input.title, input.recipe) {
            (Some(title), Some(recipe)) => (title, recipe),
            _ => {
                return Err(DriverError::InvalidInput(
                    "A drink needs both a title and a recipe".to_owned(),
                ));
            }
        };
        let title = Title::new(title)?;
        let recipe = Recipe::from_inputs(recipe)?;

        let mut tx = self.db.begin().await?;
        let title_str = title.as_str().to_owned();
        let drink = db::create_drink(tx.ex(), title, recipe)
            .await
            .map_err(|e| title_error(e, &title_str))?;
        tx.commit().await?;
        Ok(drink)
    }

    /// Applies the fields present in `input` to the existing drink `id`.
    ///
    /// The drink must exist before `input` is considered, so a request that could not be parsed
    /// is only reported after the lookup.
    pub(crate) async fn update_drink(
        self,
        id: DrinkId,
        input: ModelResult<DrinkInput>,
    ) -> DriverResult<Drink> {
        let mut tx = self.db.begin().await?;
        let mut drink = db::get_drink(tx.ex(), id).await.map_err(|e| drink_error(e, id))?;

        let input = input?;
        if input.is_empty() {
            return Err(DriverError::InvalidInput(
                "An update needs a title or a recipe".to_owned(),
            ));
        }
        if let Some(title) = input.title {
            drink.set_title(Title::new(title)?);
        }
        if let Some(recipe) = input.recipe {
            drink.set_recipe(Recipe::from_inputs(recipe)?);
        }

        db::update_drink(tx.ex(), &drink).await.map_err(|e| match e {
            DbError::AlreadyExists => title_error(e, drink.title().as_str()),
            e => drink_error(e, id),
        })?;
        tx.commit().await?;
        Ok(drink)
    }

    /// Removes the drink `id` and its recipe from the catalog.
    pub(crate) async fn delete_drink(self, id: DrinkId) -> DriverResult<DrinkId> {
        let mut tx = self.db.begin().await?;
        db::delete_drink(tx.ex(), id).await.map_err(|e| drink_error(e, id))?;
        tx.commit().await?;
        Ok(id)
    }
}
