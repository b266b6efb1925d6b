// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reads of the singleton application settings row.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::diesel_schema::app_settings;
use crate::error::PersistenceError;
use crate::mutations::settings::SETTINGS_ROW_ID;

/// Returns the raw next-tournament pointer, without resolving it.
///
/// `None` means either that the settings row has never been written or
/// that the pointer was cleared.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_next_tournament_id(
    conn: &mut SqliteConnection,
) -> Result<Option<i64>, PersistenceError> {
    let result: Result<Option<i64>, diesel::result::Error> = app_settings::table
        .filter(app_settings::id.eq(SETTINGS_ROW_ID))
        .select(app_settings::next_tournament_id)
        .first(conn);

    match result {
        Ok(pointer) => Ok(pointer),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
