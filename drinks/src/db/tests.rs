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

//! Common tests for any database implementation.

use crate::db::*;
use crate::model::*;
use coffee_shop_core::db::{Db, DbError};
use std::sync::Arc;

/// Syntactic sugar to build a recipe from `(name, color, parts)` tuples.
fn recipe(ingredients: &[(&str, &str, i64)]) -> Recipe {
    Recipe::new(
        ingredients
            .iter()
            .map(|(name, color, parts)| Ingredient::new(*name, *color, *parts).unwrap())
            .collect(),
    )
    .unwrap()
}

pub(crate) async fn test_empty_catalog(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_drinks(&mut ex).await.unwrap().is_empty());
    assert_eq!(DbError::NotFound, get_drink(&mut ex, DrinkId::new(1)).await.unwrap_err());
}

pub(crate) async fn test_create_and_get(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let latte = create_drink(
        &mut ex,
        Title::new("Latte").unwrap(),
        recipe(&[("espresso", "brown", 1), ("milk", "white", 3), ("foam", "beige", 1)]),
    )
    .await
    .unwrap();
    let water =
        create_drink(&mut ex, Title::new("Water").unwrap(), recipe(&[("water", "blue", 1)]))
            .await
            .unwrap();
    assert!(latte.id() < water.id());

    assert_eq!(latte, get_drink(&mut ex, *latte.id()).await.unwrap());
    assert_eq!(water, get_drink(&mut ex, *water.id()).await.unwrap());
    assert_eq!(vec![latte, water], get_drinks(&mut ex).await.unwrap());
}

pub(crate) async fn test_create_duplicate_title(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    create_drink(&mut ex, Title::new("Mocha").unwrap(), recipe(&[("chocolate", "brown", 1)]))
        .await
        .unwrap();
    assert_eq!(
        DbError::AlreadyExists,
        create_drink(&mut ex, Title::new("Mocha").unwrap(), recipe(&[("coffee", "black", 1)]))
            .await
            .unwrap_err()
    );
    assert_eq!(1, get_drinks(&mut ex).await.unwrap().len());
}

pub(crate) async fn test_update_ok(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let mut drink = create_drink(
        &mut ex,
        Title::new("Cortado").unwrap(),
        recipe(&[("espresso", "brown", 1), ("milk", "white", 1)]),
    )
    .await
    .unwrap();
    let other = create_drink(&mut ex, Title::new("Water").unwrap(), recipe(&[("water", "blue", 1)]))
        .await
        .unwrap();

    drink.set_title(Title::new("Big cortado").unwrap());
    drink.set_recipe(recipe(&[("milk", "white", 2), ("espresso", "brown", 2)]));
    update_drink(&mut ex, &drink).await.unwrap();

    assert_eq!(drink, get_drink(&mut ex, *drink.id()).await.unwrap());
    assert_eq!(other, get_drink(&mut ex, *other.id()).await.unwrap());
}

pub(crate) async fn test_update_not_found(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let drink = Drink::new(
        DrinkId::new(123),
        Title::new("Ghost").unwrap(),
        recipe(&[("air", "transparent", 1)]),
    );
    assert_eq!(DbError::NotFound, update_drink(&mut ex, &drink).await.unwrap_err());
    assert!(get_drinks(&mut ex).await.unwrap().is_empty());
}

pub(crate) async fn test_delete(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let first = create_drink(&mut ex, Title::new("First").unwrap(), recipe(&[("a", "red", 1)]))
        .await
        .unwrap();
    let second = create_drink(&mut ex, Title::new("Second").unwrap(), recipe(&[("b", "red", 2)]))
        .await
        .unwrap();

    delete_drink(&mut ex, *first.id()).await.unwrap();
    assert_eq!(DbError::NotFound, get_drink(&mut ex, *first.id()).await.unwrap_err());
    assert_eq!(vec![second], get_drinks(&mut ex).await.unwrap());

    assert_eq!(DbError::NotFound, delete_drink(&mut ex, *first.id()).await.unwrap_err());

    // The title becomes available again once the drink is gone.
    create_drink(&mut ex, Title::new("First").unwrap(), recipe(&[("c", "green", 3)]))
        .await
        .unwrap();
}

pub(crate) async fn test_tx_rollback(db: Arc<dyn Db + Send + Sync>) {
    {
        let mut tx = db.begin().await.unwrap();
        create_drink(tx.ex(), Title::new("Abandoned").unwrap(), recipe(&[("a", "red", 1)]))
            .await
            .unwrap();
    }

    assert!(get_drinks(&mut db.ex().await.unwrap()).await.unwrap().is_empty());
}

pub(crate) async fn test_reset_schema(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    create_drink(&mut ex, Title::new("Tea").unwrap(), recipe(&[("tea", "green", 1)]))
        .await
        .unwrap();

    reset_schema(&mut ex).await.unwrap();

    let drinks = get_drinks(&mut ex).await.unwrap();
    assert_eq!(1, drinks.len());
    assert_eq!("water", drinks[0].title().as_str());
    assert_eq!(&recipe(&[("water", "blue", 1)]), drinks[0].recipe());
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        coffee_shop_core::db::testutils::generate_tests!(
            $(#[$extra],)?
            $setup,
            $crate::db::tests,
            test_empty_catalog,
            test_create_and_get,
            test_create_duplicate_title,
            test_update_ok,
            test_update_not_found,
            test_delete,
            test_tx_rollback,
            test_reset_schema
        );
    }
];

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use coffee_shop_core::db::postgres::PostgresDb;

    async fn setup() -> PostgresDb {
        let db = coffee_shop_core::db::postgres::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(
        Arc::new(setup().await),
        #[ignore = "Requires environment configuration and is expensive"]
    );
}

mod sqlite {
    use super::*;
    use coffee_shop_core::db::sqlite::SqliteDb;

    async fn setup() -> SqliteDb {
        let db = coffee_shop_core::db::sqlite::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(Arc::new(setup().await));
}
