// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and configuring `SQLite` connections.
//!
//! Every connection is opened the same way: establish, apply the
//! connection pragmas, run the embedded migrations, then confirm foreign
//! keys are enforced. Version rows cascade with their setlist and band
//! members with their band, so a connection without enforcement is refused.

use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::path::Path;
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a writer waits on a locked file database, in milliseconds.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Where a database lives.
pub enum Storage<'a> {
    /// A named shared-cache in-memory database.
    Memory(&'a str),
    /// A database file, created if missing.
    File(&'a Path),
}

impl Storage<'_> {
    fn url(&self) -> Result<String, PersistenceError> {
        match self {
            Self::Memory(name) => Ok(format!("file:{name}?mode=memory&cache=shared")),
            Self::File(path) => path.to_str().map(str::to_string).ok_or_else(|| {
                PersistenceError::InitializationError(format!(
                    "Database path is not valid UTF-8: {}",
                    path.display()
                ))
            }),
        }
    }

    fn pragmas(&self) -> Vec<String> {
        let mut pragmas: Vec<String> = vec![String::from("PRAGMA foreign_keys = ON")];
        if matches!(self, Self::File(_)) {
            pragmas.push(String::from("PRAGMA journal_mode = WAL"));
            pragmas.push(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"));
        }
        pragmas
    }
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a connection, migrates it, and checks foreign key enforcement.
///
/// # Errors
///
/// Returns an error if the database cannot be reached, a pragma or
/// migration fails, or foreign keys are not enforced.
pub fn open(storage: &Storage<'_>) -> Result<SqliteConnection, PersistenceError> {
    let url: String = storage.url()?;
    info!(database = %url, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(&url)?;

    for pragma in storage.pragmas() {
        debug!(pragma = %pragma, "Applying connection pragma");
        diesel::sql_query(pragma.as_str())
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!(count = applied.len(), "Applied pending migrations");

    verify_foreign_key_enforcement(&mut conn)?;
    Ok(conn)
}

/// Confirms the connection enforces foreign keys.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` if enforcement is off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}
