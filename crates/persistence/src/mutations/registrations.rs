// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration write operations.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use shatranj_domain::{CertificateId, RegistrationDraft};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::registrations;
use crate::error::PersistenceError;

/// Inserts a new registration and returns its assigned ID.
///
/// The certificate identifier has already been allocated by the caller;
/// the unique index on the column is the last line of defense against a
/// concurrent duplicate.
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateKey`] if the certificate
/// identifier is already assigned, or another error if the insert fails.
pub fn insert_registration(
    conn: &mut SqliteConnection,
    draft: &RegistrationDraft,
    certificate_id: &CertificateId,
    stamp: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating registration for tournament ID: {} with certificate ID: {}",
        draft.tournament_id, certificate_id
    );

    diesel::insert_into(registrations::table)
        .values((
            registrations::tournament_id.eq(draft.tournament_id),
            registrations::name.eq(&draft.name),
            registrations::phone.eq(&draft.phone),
            registrations::email.eq(&draft.email),
            registrations::year_of_birth.eq(i32::from(draft.year_of_birth)),
            registrations::description.eq(draft.description.as_deref()),
            registrations::agreed_tos.eq(i32::from(draft.agreed_tos)),
            registrations::receipt_path.eq(&draft.receipt_path),
            registrations::certificate_id.eq(certificate_id.value()),
            registrations::certificate_confirmed.eq(0),
            registrations::created_at.eq(stamp),
        ))
        .execute(conn)?;

    let registration_id: i64 = get_last_insert_rowid(conn)?;
    info!("Created registration ID: {}", registration_id);
    Ok(registration_id)
}

/// Marks the certificate of a registration as confirmed.
///
/// Confirming an already confirmed registration is a no-op that still
/// succeeds.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the registration does not
/// exist, or another error if the update fails.
pub fn confirm_certificate(
    conn: &mut SqliteConnection,
    registration_id: i64,
) -> Result<(), PersistenceError> {
    info!(
        "Confirming certificate for registration ID: {}",
        registration_id
    );

    let rows_affected: usize = diesel::update(registrations::table)
        .filter(registrations::id.eq(registration_id))
        .set(registrations::certificate_confirmed.eq(1))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Registration with ID {registration_id} not found"
        )));
    }
    Ok(())
}
