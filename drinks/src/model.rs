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

//! High-level data types.

use coffee_shop_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Identifier of a drink as assigned by the database.
#[derive(Clone, Constructor, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct DrinkId(i64);

impl DrinkId {
    /// Returns the identifier as an `i64`.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

/// Title of a drink.  Never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a new title after validating that it is not empty.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Title cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the title.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One component of a recipe.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Ingredient {
    /// Name of the ingredient.
    name: String,

    /// Color used to draw the ingredient.
    color: String,

    /// Number of parts of this ingredient in the drink.  Never zero.
    parts: i64,
}

impl Ingredient {
    /// Creates a new ingredient after validating that all of its fields are set.
    pub fn new<S1: Into<String>, S2: Into<String>>(
        name: S1,
        color: S2,
        parts: i64,
    ) -> ModelResult<Self> {
        let name = name.into();
        let color = color.into();
        if name.is_empty() {
            return Err(ModelError("Ingredient name cannot be empty".to_owned()));
        }
        if color.is_empty() {
            return Err(ModelError("Ingredient color cannot be empty".to_owned()));
        }
        if parts == 0 {
            return Err(ModelError("Ingredient parts cannot be zero".to_owned()));
        }
        Ok(Self { name, color, parts })
    }
}

/// Ordered list of ingredients that make up a drink.  Never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub struct Recipe(Vec<Ingredient>);

impl Recipe {
    /// Creates a new recipe after validating that it has at least one ingredient.
    pub fn new(ingredients: Vec<Ingredient>) -> ModelResult<Self> {
        if ingredients.is_empty() {
            return Err(ModelError("Recipe must have at least one ingredient".to_owned()));
        }
        Ok(Self(ingredients))
    }

    /// Validates a recipe as submitted by a client.
    pub(crate) fn from_inputs(inputs: Vec<IngredientInput>) -> ModelResult<Self> {
        let ingredients =
            inputs.into_iter().map(IngredientInput::into_ingredient).collect::<ModelResult<_>>()?;
        Recipe::new(ingredients)
    }

    /// Returns the ingredients in order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.0
    }
}

/// A drink in the catalog.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Drink {
    /// Identifier of the drink.
    id: DrinkId,

    /// Title of the drink.
    title: Title,

    /// Recipe of the drink.
    recipe: Recipe,
}

impl Drink {
    /// Replaces the title of the drink.
    pub(crate) fn set_title(&mut self, title: Title) {
        self.title = title;
    }

    /// Replaces the whole recipe of the drink.
    pub(crate) fn set_recipe(&mut self, recipe: Recipe) {
        self.recipe = recipe;
    }
}

/// Unvalidated ingredient as submitted by a client.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub struct IngredientInput {
    /// Name of the ingredient.
    pub name: Option<String>,

    /// Color of the ingredient.
    pub color: Option<String>,

    /// Number of parts of the ingredient.
    pub parts: Option<i64>,
}

impl IngredientInput {
    /// Validates the ingredient and converts it into its typed form.
    pub(crate) fn into_ingredient(self) -> ModelResult<Ingredient> {
        let name = self.name.ok_or_else(|| missing_field("name"))?;
        let color = self.color.ok_or_else(|| missing_field("color"))?;
        let parts = self.parts.ok_or_else(|| missing_field("parts"))?;
        Ingredient::new(name, color, parts)
    }
}

/// Builds the error for an ingredient that lacks `field`.
fn missing_field(field: &str) -> ModelError {
    ModelError(format!("Ingredient is missing the {} field", field))
}

/// Unvalidated drink as submitted by a client.  Absent fields are `None`.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub struct DrinkInput {
    /// Title of the drink.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,

    /// Recipe of the drink.
    #[cfg_attr(test, serde(skip_serializing_if = "Option::is_none"))]
    pub recipe: Option<Vec<IngredientInput>>,
}

impl DrinkInput {
    /// Returns true if the client did not submit any field.
    pub(crate) fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }
}
