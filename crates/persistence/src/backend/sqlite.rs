// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup: pragmas, migrations, and rowid access.

use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

/// Migrations embedded into the binary at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens a connection, enables foreign key enforcement, and applies any
/// pending migrations.
///
/// # Arguments
///
/// * `database_url` - Path or URL understood by `SQLite`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established, a pragma
/// fails, or a migration cannot be applied.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Initializing SQLite database at: {}", database_url);
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    // NOTE: PRAGMA statements have no Diesel DSL and stay raw SQL.
    sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("Failed to enable foreign keys: {e}")))?;

    run_migrations(&mut conn)?;
    Ok(conn)
}

fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Running database migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::BackendUnavailable(format!("Migration failed: {e}")))?;
    Ok(())
}

/// Switches the database file to write-ahead logging.
///
/// # Errors
///
/// Returns an error if the pragma fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Enabling WAL mode for SQLite database");
    sql_query("PRAGMA journal_mode = WAL;")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("Failed to enable WAL mode: {e}")))?;
    Ok(())
}

/// Confirms that the connection enforces foreign keys.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read or enforcement is
/// disabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: PragmaRow = sql_query("PRAGMA foreign_keys")
        .get_result(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("Failed to read foreign_keys pragma: {e}"))
        })?;

    if row.foreign_keys == 0 {
        return Err(PersistenceError::BackendUnavailable(
            "SQLite foreign key enforcement is not enabled".to_string(),
        ));
    }
    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Returns the rowid of the most recent successful insert on this
/// connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::sql;
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
