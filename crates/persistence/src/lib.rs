// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration store for the Shatranj tournament service.
//!
//! This crate persists tournaments, registrations, and the application
//! settings singleton behind one adapter type, [`Persistence`]. Two
//! backends implement the same contract:
//!
//! - A durable `SQLite` database accessed through Diesel, with embedded
//!   migrations applied at startup.
//! - A process-local in-memory store used when no database is configured
//!   or the durable backend fails to initialize.
//!
//! Callers pick a backend once at construction and never branch on it
//! again; every public method dispatches internally. Records returned by
//! the two backends are shaped identically, down to the canonical
//! timestamp encoding described in [`instant`].
//!
//! The store trusts its callers: validation and normalization happen
//! before anything reaches this crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod backend;
pub mod diesel_schema;
pub mod error;
pub mod instant;
pub mod memory;
pub mod mutations;
pub mod queries;

#[cfg(test)]
mod tests;

use diesel::sqlite::SqliteConnection;
use shatranj_domain::{CertificateId, Registration, RegistrationDraft, Tournament, TournamentDraft};
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

pub use error::PersistenceError;
pub use instant::{format_instant, parse_instant};
pub use memory::MemoryStore;

/// Upper bound on candidate certificate identifiers drawn per
/// registration before reporting exhaustion.
pub const CERTIFICATE_ID_ATTEMPTS: u32 = 10;

#[cfg(test)]
static DB_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Active backend for a [`Persistence`] value.
pub enum BackendConnection {
    /// Durable SQLite-backed connection.
    Sqlite(SqliteConnection),
    /// Process-local in-memory store.
    Memory(MemoryStore),
}

/// Storage adapter for tournaments, registrations, and settings.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a store backed by process-local memory.
    ///
    /// Data lives only as long as the process; a restart starts empty.
    #[must_use]
    pub fn new_in_memory() -> Self {
        info!("Creating in-memory registration store");
        Self {
            conn: BackendConnection::Memory(MemoryStore::default()),
        }
    }

    /// Creates a store backed by a `SQLite` database file.
    ///
    /// Opens the file, applies pending migrations, switches the file to
    /// WAL mode, and verifies that foreign keys are enforced.
    ///
    /// # Arguments
    ///
    /// * `database_path` - Path of the database file to open or create.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BackendUnavailable`] or
    /// [`PersistenceError::QueryFailed`] if the database cannot be
    /// opened, migrated, or verified.
    pub fn new_with_file<P: AsRef<std::path::Path>>(
        database_path: P,
    ) -> Result<Self, PersistenceError> {
        let path_str: &str = database_path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::BackendUnavailable("Database path is not valid UTF-8".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        info!("SQLite registration store ready at: {}", path_str);
        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Selects a backend from optional configuration.
    ///
    /// A configured path selects the durable backend. A missing path, or
    /// a durable backend that fails to initialize, falls back to the
    /// in-memory store; the fallback is logged as a warning because it
    /// silently discards data across restarts.
    #[must_use]
    pub fn from_database_path(database_path: Option<&str>) -> Self {
        match database_path {
            Some(path) => match Self::new_with_file(path) {
                Ok(persistence) => persistence,
                Err(e) => {
                    warn!(
                        "Durable backend unavailable ({}), falling back to in-memory storage; data will not survive a restart",
                        e
                    );
                    Self::new_in_memory()
                }
            },
            None => {
                warn!(
                    "No database path configured, using in-memory storage; data will not survive a restart"
                );
                Self::new_in_memory()
            }
        }
    }

    /// `SQLite` store held entirely in memory, shared across connections
    /// within this process through the URI cache name.
    #[cfg(test)]
    pub(crate) fn new_sqlite_shared_memory() -> Result<Self, PersistenceError> {
        use std::sync::atomic::Ordering;

        let id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let database_url: String = format!("file:shatranj_test_{id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&database_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Reports whether records survive a process restart.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        matches!(self.conn, BackendConnection::Sqlite(_))
    }

    // =========================================================================
    // Tournaments
    // =========================================================================

    /// Stores a new tournament and returns the full record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_tournament(
        &mut self,
        draft: &TournamentDraft,
    ) -> Result<Tournament, PersistenceError> {
        let stamp: String = format_instant(OffsetDateTime::now_utc());
        let tournament_id: i64 = match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::create_tournament(conn, draft, &stamp)?,
            BackendConnection::Memory(store) => store.create_tournament(draft, &stamp),
        };
        self.get_tournament(tournament_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Tournament with ID {tournament_id} not found"))
        })
    }

    /// Overwrites every editable field of a tournament and returns the
    /// updated record. The creation time is preserved; the update time is
    /// restamped.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the tournament does not
    /// exist, or another error if the update fails.
    pub fn update_tournament(
        &mut self,
        tournament_id: i64,
        draft: &TournamentDraft,
    ) -> Result<Tournament, PersistenceError> {
        let stamp: String = format_instant(OffsetDateTime::now_utc());
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::update_tournament(conn, tournament_id, draft, &stamp)?;
            }
            BackendConnection::Memory(store) => {
                store.update_tournament(tournament_id, draft, &stamp)?;
            }
        }
        self.get_tournament(tournament_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Tournament with ID {tournament_id} not found"))
        })
    }

    /// Deletes a tournament together with its registrations, clearing
    /// the next-tournament pointer when it references the deleted
    /// tournament.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the tournament does not
    /// exist; in that case nothing is deleted.
    pub fn delete_tournament(&mut self, tournament_id: i64) -> Result<(), PersistenceError> {
        let stamp: String = format_instant(OffsetDateTime::now_utc());
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::delete_tournament(conn, tournament_id, &stamp)
            }
            BackendConnection::Memory(store) => store.delete_tournament(tournament_id),
        }
    }

    /// Fetches one tournament by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn get_tournament(
        &mut self,
        tournament_id: i64,
    ) -> Result<Option<Tournament>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_tournament(conn, tournament_id),
            BackendConnection::Memory(store) => Ok(store.get_tournament(tournament_id)),
        }
    }

    /// Lists tournaments currently open for registration, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_open_tournaments(&mut self) -> Result<Vec<Tournament>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_open_tournaments(conn),
            BackendConnection::Memory(store) => Ok(store.get_open_tournaments()),
        }
    }

    /// Lists every tournament, most recent date first, optionally
    /// restricted to dates on or after `from_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_tournaments(
        &mut self,
        from_date: Option<&str>,
    ) -> Result<Vec<Tournament>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_all_tournaments(conn, from_date),
            BackendConnection::Memory(store) => Ok(store.get_all_tournaments(from_date)),
        }
    }

    // =========================================================================
    // Application settings
    // =========================================================================

    /// Resolves the next-tournament pointer to a full record.
    ///
    /// Returns `None` when the pointer is unset or references a deleted
    /// tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup fails.
    pub fn get_next_tournament(&mut self) -> Result<Option<Tournament>, PersistenceError> {
        let pointer: Option<i64> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_next_tournament_id(conn)?,
            BackendConnection::Memory(store) => store.get_next_tournament_id(),
        };
        match pointer {
            Some(tournament_id) => self.get_tournament(tournament_id),
            None => Ok(None),
        }
    }

    /// Points the next-tournament setting at a tournament.
    ///
    /// The store does not require the target to exist; callers decide
    /// whether to check first.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_next_tournament(&mut self, tournament_id: i64) -> Result<(), PersistenceError> {
        let stamp: String = format_instant(OffsetDateTime::now_utc());
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::set_next_tournament(conn, tournament_id, &stamp)?;
            }
            BackendConnection::Memory(store) => {
                store.set_next_tournament(tournament_id);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Registrations
    // =========================================================================

    /// Stores a registration, allocating a unique certificate identifier
    /// for it, and returns the full record.
    ///
    /// Candidate identifiers are drawn at random and checked against
    /// stored registrations; allocation gives up after
    /// [`CERTIFICATE_ID_ATTEMPTS`] collisions in a row.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the referenced
    /// tournament does not exist,
    /// [`PersistenceError::CertificateIdExhausted`] if no free identifier
    /// was found, or another error if the insert fails.
    pub fn create_registration(
        &mut self,
        draft: &RegistrationDraft,
    ) -> Result<Registration, PersistenceError> {
        if self.get_tournament(draft.tournament_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Tournament with ID {} not found",
                draft.tournament_id
            )));
        }

        let certificate_id: CertificateId = self.allocate_certificate_id()?;
        let stamp: String = format_instant(OffsetDateTime::now_utc());
        let registration_id: i64 = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::insert_registration(conn, draft, &certificate_id, &stamp)?
            }
            BackendConnection::Memory(store) => {
                store.insert_registration(draft, &certificate_id, &stamp)?
            }
        };
        self.get_registration(registration_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Registration with ID {registration_id} not found"))
        })
    }

    fn allocate_certificate_id(&mut self) -> Result<CertificateId, PersistenceError> {
        for _ in 0..CERTIFICATE_ID_ATTEMPTS {
            let candidate: CertificateId = CertificateId::generate();
            if self.certificate_id_exists(&candidate)? {
                debug!("Certificate ID {} already assigned, drawing again", candidate);
                continue;
            }
            return Ok(candidate);
        }

        error!(
            "Could not allocate a free certificate ID after {} attempts",
            CERTIFICATE_ID_ATTEMPTS
        );
        Err(PersistenceError::CertificateIdExhausted {
            attempts: CERTIFICATE_ID_ATTEMPTS,
        })
    }

    fn certificate_id_exists(
        &mut self,
        certificate_id: &CertificateId,
    ) -> Result<bool, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::certificate_id_exists(conn, certificate_id),
            BackendConnection::Memory(store) => {
                Ok(store.certificate_id_exists(certificate_id.value()))
            }
        }
    }

    /// Fetches one registration by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn get_registration(
        &mut self,
        registration_id: i64,
    ) -> Result<Option<Registration>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_registration(conn, registration_id),
            BackendConnection::Memory(store) => Ok(store.get_registration(registration_id)),
        }
    }

    /// Fetches one registration by its certificate identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn get_registration_by_certificate(
        &mut self,
        certificate_id: &CertificateId,
    ) -> Result<Option<Registration>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::get_registration_by_certificate(conn, certificate_id)
            }
            BackendConnection::Memory(store) => {
                Ok(store.get_registration_by_certificate(certificate_id.value()))
            }
        }
    }

    /// Marks the certificate of a registration as confirmed and returns
    /// the updated record. Confirming twice succeeds and leaves the
    /// record confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the registration does
    /// not exist, or another error if the update fails.
    pub fn confirm_certificate(
        &mut self,
        registration_id: i64,
    ) -> Result<Registration, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::confirm_certificate(conn, registration_id)?;
            }
            BackendConnection::Memory(store) => {
                store.confirm_certificate(registration_id)?;
            }
        }
        self.get_registration(registration_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Registration with ID {registration_id} not found"))
        })
    }

    /// Lists registrations, newest first, optionally restricted to one
    /// tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_registrations(
        &mut self,
        tournament_id: Option<i64>,
    ) -> Result<Vec<Registration>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_registrations(conn, tournament_id),
            BackendConnection::Memory(store) => Ok(store.get_registrations(tournament_id)),
        }
    }
}
