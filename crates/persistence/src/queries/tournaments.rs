// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament read operations.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use shatranj_domain::Tournament;

use crate::diesel_schema::tournaments;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = tournaments)]
struct TournamentRow {
    id: i64,
    name: String,
    date: String,
    time: String,
    is_open: i32,
    venue_address: String,
    venue_info: Option<String>,
    registration_fee: String,
    created_at: String,
    updated_at: String,
}

fn to_tournament(row: TournamentRow) -> Tournament {
    Tournament {
        tournament_id: row.id,
        name: row.name,
        date: row.date,
        time: row.time,
        is_open: row.is_open != 0,
        venue_address: row.venue_address,
        venue_info: row.venue_info,
        registration_fee: row.registration_fee,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Fetches one tournament by ID.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub fn get_tournament(
    conn: &mut SqliteConnection,
    tournament_id: i64,
) -> Result<Option<Tournament>, PersistenceError> {
    let result: Result<TournamentRow, diesel::result::Error> = tournaments::table
        .filter(tournaments::id.eq(tournament_id))
        .select(TournamentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_tournament(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists tournaments currently open for registration, soonest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_open_tournaments(
    conn: &mut SqliteConnection,
) -> Result<Vec<Tournament>, PersistenceError> {
    let rows: Vec<TournamentRow> = tournaments::table
        .filter(tournaments::is_open.ne(0))
        .select(TournamentRow::as_select())
        .order((tournaments::date.asc(), tournaments::id.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(to_tournament).collect())
}

/// Lists every tournament, most recent date first.
///
/// # Arguments
///
/// * `conn` - Database connection.
/// * `from_date` - When set, only tournaments on or after this canonical
///   instant are returned.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_all_tournaments(
    conn: &mut SqliteConnection,
    from_date: Option<&str>,
) -> Result<Vec<Tournament>, PersistenceError> {
    let mut query = tournaments::table
        .select(TournamentRow::as_select())
        .order((tournaments::date.desc(), tournaments::id.desc()))
        .into_boxed();

    if let Some(from_date) = from_date {
        query = query.filter(tournaments::date.ge(from_date));
    }

    let rows: Vec<TournamentRow> = query.load(conn)?;
    Ok(rows.into_iter().map(to_tournament).collect())
}
