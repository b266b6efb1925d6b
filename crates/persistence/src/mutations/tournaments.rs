// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament write operations.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use shatranj_domain::TournamentDraft;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{app_settings, registrations, tournaments};
use crate::error::PersistenceError;

/// Inserts a new tournament and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - Database connection.
/// * `draft` - Field values for the new tournament.
/// * `stamp` - Canonical instant stored as both creation and update time.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_tournament(
    conn: &mut SqliteConnection,
    draft: &TournamentDraft,
    stamp: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating tournament: {}", draft.name);

    diesel::insert_into(tournaments::table)
        .values((
            tournaments::name.eq(&draft.name),
            tournaments::date.eq(&draft.date),
            tournaments::time.eq(&draft.time),
            tournaments::is_open.eq(i32::from(draft.is_open)),
            tournaments::venue_address.eq(&draft.venue_address),
            tournaments::venue_info.eq(draft.venue_info.as_deref()),
            tournaments::registration_fee.eq(&draft.registration_fee),
            tournaments::created_at.eq(stamp),
            tournaments::updated_at.eq(stamp),
        ))
        .execute(conn)?;

    let tournament_id: i64 = get_last_insert_rowid(conn)?;
    info!("Created tournament ID: {}", tournament_id);
    Ok(tournament_id)
}

/// Overwrites every editable field of a tournament and restamps its
/// update time.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the tournament does not
/// exist, or another error if the update fails.
pub fn update_tournament(
    conn: &mut SqliteConnection,
    tournament_id: i64,
    draft: &TournamentDraft,
    stamp: &str,
) -> Result<(), PersistenceError> {
    info!("Updating tournament ID: {}", tournament_id);

    let rows_affected: usize = diesel::update(tournaments::table)
        .filter(tournaments::id.eq(tournament_id))
        .set((
            tournaments::name.eq(&draft.name),
            tournaments::date.eq(&draft.date),
            tournaments::time.eq(&draft.time),
            tournaments::is_open.eq(i32::from(draft.is_open)),
            tournaments::venue_address.eq(&draft.venue_address),
            tournaments::venue_info.eq(draft.venue_info.as_deref()),
            tournaments::registration_fee.eq(&draft.registration_fee),
            tournaments::updated_at.eq(stamp),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Tournament with ID {tournament_id} not found"
        )));
    }
    Ok(())
}

/// Deletes a tournament, its registrations, and any next-tournament
/// pointer referencing it, all in one transaction.
///
/// # Arguments
///
/// * `conn` - Database connection.
/// * `tournament_id` - Tournament to delete.
/// * `stamp` - Canonical instant stored on the settings row when the
///   pointer is cleared.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the tournament does not
/// exist; the transaction rolls back and nothing is deleted.
pub fn delete_tournament(
    conn: &mut SqliteConnection,
    tournament_id: i64,
    stamp: &str,
) -> Result<(), PersistenceError> {
    info!(
        "Deleting tournament ID: {} and its registrations",
        tournament_id
    );

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed: usize = diesel::delete(registrations::table)
            .filter(registrations::tournament_id.eq(tournament_id))
            .execute(conn)?;
        debug!(
            "Removed {} registrations for tournament ID: {}",
            removed, tournament_id
        );

        let rows_affected: usize = diesel::delete(tournaments::table)
            .filter(tournaments::id.eq(tournament_id))
            .execute(conn)?;
        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Tournament with ID {tournament_id} not found"
            )));
        }

        diesel::update(app_settings::table)
            .filter(app_settings::next_tournament_id.eq(tournament_id))
            .set((
                app_settings::next_tournament_id.eq(None::<i64>),
                app_settings::updated_at.eq(stamp),
            ))
            .execute(conn)?;

        Ok(())
    })
}
