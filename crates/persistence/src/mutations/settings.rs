// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes to the singleton application settings row.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::info;

use crate::diesel_schema::app_settings;
use crate::error::PersistenceError;

/// Fixed primary key of the singleton settings row.
pub(crate) const SETTINGS_ROW_ID: i64 = 1;

/// Points the next-tournament setting at a tournament, creating the
/// settings row on first use.
///
/// The target is not required to exist. A pointer left dangling by a
/// later delete reads back as no upcoming tournament.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn set_next_tournament(
    conn: &mut SqliteConnection,
    tournament_id: i64,
    stamp: &str,
) -> Result<(), PersistenceError> {
    info!("Setting next tournament pointer to ID: {}", tournament_id);

    let rows_affected: usize = diesel::update(app_settings::table)
        .filter(app_settings::id.eq(SETTINGS_ROW_ID))
        .set((
            app_settings::next_tournament_id.eq(Some(tournament_id)),
            app_settings::updated_at.eq(stamp),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        diesel::insert_into(app_settings::table)
            .values((
                app_settings::id.eq(SETTINGS_ROW_ID),
                app_settings::next_tournament_id.eq(Some(tournament_id)),
                app_settings::updated_at.eq(stamp),
            ))
            .execute(conn)?;
    }
    Ok(())
}
