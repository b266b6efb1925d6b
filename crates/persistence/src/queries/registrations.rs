// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration read operations.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use num_traits::ToPrimitive;
use shatranj_domain::{CertificateId, Registration};

use crate::diesel_schema::registrations;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = registrations)]
struct RegistrationRow {
    id: i64,
    tournament_id: i64,
    name: String,
    phone: String,
    email: String,
    year_of_birth: i32,
    description: Option<String>,
    agreed_tos: i32,
    receipt_path: String,
    certificate_id: String,
    certificate_confirmed: i32,
    created_at: String,
}

fn to_registration(row: RegistrationRow) -> Result<Registration, PersistenceError> {
    let certificate_id: CertificateId = CertificateId::parse(&row.certificate_id).map_err(|e| {
        PersistenceError::DatabaseError(format!(
            "Stored certificate ID for registration {} is malformed: {e}",
            row.id
        ))
    })?;
    let year_of_birth: u16 = row.year_of_birth.to_u16().ok_or_else(|| {
        PersistenceError::DatabaseError(format!(
            "Stored year of birth for registration {} is out of range: {}",
            row.id, row.year_of_birth
        ))
    })?;

    Ok(Registration {
        registration_id: row.id,
        tournament_id: row.tournament_id,
        name: row.name,
        phone: row.phone,
        email: row.email,
        year_of_birth,
        description: row.description,
        agreed_tos: row.agreed_tos != 0,
        receipt_path: row.receipt_path,
        certificate_id,
        certificate_confirmed: row.certificate_confirmed != 0,
        created_at: row.created_at,
    })
}

/// Fetches one registration by ID.
///
/// # Errors
///
/// Returns an error if the lookup fails or the stored row cannot be
/// interpreted.
pub fn get_registration(
    conn: &mut SqliteConnection,
    registration_id: i64,
) -> Result<Option<Registration>, PersistenceError> {
    let result: Result<RegistrationRow, diesel::result::Error> = registrations::table
        .filter(registrations::id.eq(registration_id))
        .select(RegistrationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_registration(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Fetches one registration by its certificate identifier.
///
/// # Errors
///
/// Returns an error if the lookup fails or the stored row cannot be
/// interpreted.
pub fn get_registration_by_certificate(
    conn: &mut SqliteConnection,
    certificate_id: &CertificateId,
) -> Result<Option<Registration>, PersistenceError> {
    let result: Result<RegistrationRow, diesel::result::Error> = registrations::table
        .filter(registrations::certificate_id.eq(certificate_id.value()))
        .select(RegistrationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(to_registration(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Reports whether a certificate identifier is already assigned.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn certificate_id_exists(
    conn: &mut SqliteConnection,
    certificate_id: &CertificateId,
) -> Result<bool, PersistenceError> {
    use diesel::dsl::count;

    let assigned: i64 = registrations::table
        .filter(registrations::certificate_id.eq(certificate_id.value()))
        .select(count(registrations::id))
        .first(conn)?;

    Ok(assigned > 0)
}

/// Lists registrations, newest first.
///
/// # Arguments
///
/// * `conn` - Database connection.
/// * `tournament_id` - When set, restricts the listing to one tournament.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be
/// interpreted.
pub fn get_registrations(
    conn: &mut SqliteConnection,
    tournament_id: Option<i64>,
) -> Result<Vec<Registration>, PersistenceError> {
    let mut query = registrations::table
        .select(RegistrationRow::as_select())
        .order((registrations::created_at.desc(), registrations::id.desc()))
        .into_boxed();

    if let Some(tournament_id) = tournament_id {
        query = query.filter(registrations::tournament_id.eq(tournament_id));
    }

    let rows: Vec<RegistrationRow> = query.load(conn)?;
    rows.into_iter().map(to_registration).collect()
}
