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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::{Drink, DrinkId, Ingredient, Recipe, Title};
#[cfg(feature = "postgres")]
use coffee_shop_core::db::postgres;
#[cfg(test)]
use coffee_shop_core::db::sqlite;
use coffee_shop_core::db::{DbError, DbResult, Executor};
use log::info;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(test)]
use sqlx::sqlite::SqliteRow;

#[cfg(test)]
pub(crate) mod tests;

/// Statements to drop the whole schema, in dependency order.
const DROP_SCHEMA: &str = "DROP TABLE IF EXISTS ingredients; DROP TABLE IF EXISTS drinks";

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Drops all data, recreates the schema and seeds the catalog with a sample drink.
pub async fn reset_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, DROP_SCHEMA).await?,

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, DROP_SCHEMA).await?,

        #[allow(unused)]
        _ => unreachable!(),
    }
    init_schema(ex).await?;

    let title = Title::new("water")?;
    let recipe = Recipe::new(vec![Ingredient::new("water", "blue", 1)?])?;
    let drink = create_drink(ex, title, recipe).await?;
    info!("Database reset; seeded drink {}", drink.id().as_i64());
    Ok(())
}

/// One row of the join between drinks and their ingredients.
///
/// Ingredient columns are null for drinks without ingredients, which should never exist.
struct JoinedRow {
    /// Identifier of the drink.
    id: i64,

    /// Title of the drink.
    title: String,

    /// Name of the ingredient.
    name: Option<String>,

    /// Color of the ingredient.
    color: Option<String>,

    /// Parts of the ingredient.
    parts: Option<i64>,
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for JoinedRow {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get("id").map_err(postgres::map_sqlx_error)?,
            title: row.try_get("title").map_err(postgres::map_sqlx_error)?,
            name: row.try_get("name").map_err(postgres::map_sqlx_error)?,
            color: row.try_get("color").map_err(postgres::map_sqlx_error)?,
            parts: row.try_get("parts").map_err(postgres::map_sqlx_error)?,
        })
    }
}

#[cfg(test)]
impl TryFrom<SqliteRow> for JoinedRow {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get("id").map_err(sqlite::map_sqlx_error)?,
            title: row.try_get("title").map_err(sqlite::map_sqlx_error)?,
            name: row.try_get("name").map_err(sqlite::map_sqlx_error)?,
            color: row.try_get("color").map_err(sqlite::map_sqlx_error)?,
            parts: row.try_get("parts").map_err(sqlite::map_sqlx_error)?,
        })
    }
}

/// Folds rows sorted by drink and ingredient position into drinks.
fn fold_drinks(rows: Vec<JoinedRow>) -> DbResult<Vec<Drink>> {
    /// Drink being assembled from consecutive rows.
    struct Partial {
        /// Identifier of the drink.
        id: i64,

        /// Title of the drink.
        title: String,

        /// Ingredients seen so far.
        ingredients: Vec<Ingredient>,
    }

    fn finish(partial: Partial) -> DbResult<Drink> {
        Ok(Drink::new(
            DrinkId::new(partial.id),
            Title::new(partial.title)?,
            Recipe::new(partial.ingredients)?,
        ))
    }

    let mut drinks = vec![];
    let mut current: Option<Partial> = None;
    for row in rows {
        let partial = match current.take() {
            Some(partial) if partial.id == row.id => partial,
            previous => {
                if let Some(previous) = previous {
                    drinks.push(finish(previous)?);
                }
                Partial { id: row.id, title: row.title, ingredients: vec![] }
            }
        };
        let partial = current.insert(partial);

        match (row.name, row.color, row.parts) {
            (Some(name), Some(color), Some(parts)) => {
                partial.ingredients.push(Ingredient::new(name, color, parts)?);
            }
            (None, None, None) => (),
            _ => {
                return Err(DbError::DataIntegrityError(format!(
                    "Incomplete ingredient for drink {}",
                    row.id
                )));
            }
        }
    }
    if let Some(partial) = current {
        drinks.push(finish(partial)?);
    }
    Ok(drinks)
}

/// Gets all drinks ordered by their identifier.
pub(crate) async fn get_drinks(ex: &mut Executor) -> DbResult<Vec<Drink>> {
    let rows = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT d.id, d.title, i.name, i.color, i.parts
                FROM drinks d LEFT JOIN ingredients i ON i.drink_id = d.id
                ORDER BY d.id, i.position
            ";
            let raw_rows =
                sqlx::query(query_str).fetch_all(ex.conn()).await.map_err(postgres::map_sqlx_error)?;
            raw_rows.into_iter().map(JoinedRow::try_from).collect::<DbResult<Vec<_>>>()?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT d.id, d.title, i.name, i.color, i.parts
                FROM drinks d LEFT JOIN ingredients i ON i.drink_id = d.id
                ORDER BY d.id, i.position
            ";
            let raw_rows =
                sqlx::query(query_str).fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            raw_rows.into_iter().map(JoinedRow::try_from).collect::<DbResult<Vec<_>>>()?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    fold_drinks(rows)
}

/// Gets the drink identified by `id`.
pub(crate) async fn get_drink(ex: &mut Executor, id: DrinkId) -> DbResult<Drink> {
    let rows = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT d.id, d.title, i.name, i.color, i.parts
                FROM drinks d LEFT JOIN ingredients i ON i.drink_id = d.id
                WHERE d.id = $1
                ORDER BY i.position
            ";
            let raw_rows = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            raw_rows.into_iter().map(JoinedRow::try_from).collect::<DbResult<Vec<_>>>()?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT d.id, d.title, i.name, i.color, i.parts
                FROM drinks d LEFT JOIN ingredients i ON i.drink_id = d.id
                WHERE d.id = ?
                ORDER BY i.position
            ";
            let raw_rows = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            raw_rows.into_iter().map(JoinedRow::try_from).collect::<DbResult<Vec<_>>>()?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    let mut drinks = fold_drinks(rows)?;
    match drinks.pop() {
        Some(drink) if drinks.is_empty() => Ok(drink),
        Some(_) => Err(DbError::DataIntegrityError(format!(
            "Multiple drinks found for id {}",
            id.as_i64()
        ))),
        None => Err(DbError::NotFound),
    }
}

/// Stores the ingredients of `recipe` for the drink `id`, which must not have any yet.
async fn put_ingredients(ex: &mut Executor, id: DrinkId, recipe: &Recipe) -> DbResult<()> {
    for (position, ingredient) in recipe.ingredients().iter().enumerate() {
        let position = i32::try_from(position)
            .map_err(|e| DbError::BackendError(format!("Recipe is too long: {}", e)))?;

        let rows_affected = match ex {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => {
                let query_str = "
                    INSERT INTO ingredients (drink_id, position, name, color, parts)
                    VALUES ($1, $2, $3, $4, $5)
                ";
                let done = sqlx::query(query_str)
                    .bind(id.as_i64())
                    .bind(position)
                    .bind(ingredient.name())
                    .bind(ingredient.color())
                    .bind(*ingredient.parts())
                    .execute(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?;
                done.rows_affected()
            }

            #[cfg(test)]
            Executor::Sqlite(ex) => {
                let query_str = "
                    INSERT INTO ingredients (drink_id, position, name, color, parts)
                    VALUES (?, ?, ?, ?, ?)
                ";
                let done = sqlx::query(query_str)
                    .bind(id.as_i64())
                    .bind(position)
                    .bind(ingredient.name())
                    .bind(ingredient.color())
                    .bind(*ingredient.parts())
                    .execute(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?;
                done.rows_affected()
            }

            #[allow(unused)]
            _ => unreachable!(),
        };

        if rows_affected != 1 {
            return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
        }
    }
    Ok(())
}

/// Creates a new drink with the given `title` and `recipe` and returns it with its assigned id.
pub(crate) async fn create_drink(ex: &mut Executor, title: Title, recipe: Recipe) -> DbResult<Drink> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO drinks (title) VALUES ($1) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(title.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO drinks (title) VALUES (?)";
            let done = sqlx::query(query_str)
                .bind(title.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    let id = DrinkId::new(id);
    put_ingredients(ex, id, &recipe).await?;
    Ok(Drink::new(id, title, recipe))
}

/// Overwrites the title and recipe of an existing `drink`.
pub(crate) async fn update_drink(ex: &mut Executor, drink: &Drink) -> DbResult<()> {
    let id = *drink.id();
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("UPDATE drinks SET title = $1 WHERE id = $2")
                .bind(drink.title().as_str())
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            sqlx::query("DELETE FROM ingredients WHERE drink_id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("UPDATE drinks SET title = ? WHERE id = ?")
                .bind(drink.title().as_str())
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            sqlx::query("DELETE FROM ingredients WHERE drink_id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => put_ingredients(ex, id, drink.recipe()).await,
        _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
}

/// Deletes the drink identified by `id` along with its ingredients.
pub(crate) async fn delete_drink(ex: &mut Executor, id: DrinkId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            sqlx::query("DELETE FROM ingredients WHERE drink_id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            let done = sqlx::query("DELETE FROM drinks WHERE id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            sqlx::query("DELETE FROM ingredients WHERE drink_id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            let done = sqlx::query("DELETE FROM drinks WHERE id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
