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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use coffee_shop_authz::testutils::test_verifier;
use coffee_shop_core::db::Db;
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test, configured to accept tokens minted by the authz test utilities.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database with an empty catalog.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(coffee_shop_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver, test_verifier());
        Self { db, app }
    }

    /// Gets a copy of the app.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Inserts a drink named `title` with the `(name, color, parts)` ingredients.
    pub(crate) async fn create_drink(&self, title: &str, recipe: &[(&str, &str, i64)]) -> Drink {
        let recipe = Recipe::new(
            recipe
                .iter()
                .map(|(name, color, parts)| Ingredient::new(*name, *color, *parts).unwrap())
                .collect(),
        )
        .unwrap();
        db::create_drink(&mut self.db.ex().await.unwrap(), Title::new(title).unwrap(), recipe)
            .await
            .unwrap()
    }

    /// Gets all drinks straight from the database.
    pub(crate) async fn get_drinks(&self) -> Vec<Drink> {
        db::get_drinks(&mut self.db.ex().await.unwrap()).await.unwrap()
    }

    /// Gets the drink `id` straight from the database, if it exists.
    pub(crate) async fn get_drink(&self, id: DrinkId) -> Option<Drink> {
        match db::get_drink(&mut self.db.ex().await.unwrap(), id).await {
            Ok(drink) => Some(drink),
            Err(coffee_shop_core::db::DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }
}
