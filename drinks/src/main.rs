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

//! Entry point to the drinks service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use coffee_shop_authz::{AuthzOptions, JwtVerifier};
use coffee_shop_core::db::Db;
use coffee_shop_core::db::postgres::{PostgresDb, PostgresOptions};
use coffee_shop_core::env::get_optional_var;
use coffee_shop_drinks::db::{init_schema, reset_schema};
use coffee_shop_drinks::serve;
use log::warn;
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let port = get_optional_var::<u16>("DRINKS", "PORT")?.unwrap_or(5000);
    let addr = (Ipv4Addr::UNSPECIFIED, port);

    let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
    let db = Arc::new(PostgresDb::connect(db_opts)?);
    if get_optional_var::<bool>("DRINKS", "RESET_DB")?.unwrap_or(false) {
        warn!("Resetting the drinks catalog");
        let mut tx = db.begin().await?;
        reset_schema(tx.ex()).await?;
        tx.commit().await?;
    } else {
        init_schema(&mut db.ex().await?).await?;
    }

    let verifier = Arc::new(JwtVerifier::new(AuthzOptions::from_env("AUTHZ")?)?);

    serve(addr, db, verifier).await
}
