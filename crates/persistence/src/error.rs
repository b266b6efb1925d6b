// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the registration store.

use std::error::Error;
use std::fmt;

/// Errors surfaced by the registration store.
#[derive(Debug)]
pub enum PersistenceError {
    /// The durable backend could not be opened, migrated, or verified.
    BackendUnavailable(String),
    /// The database rejected an operation.
    DatabaseError(String),
    /// A raw SQL statement failed.
    QueryFailed(String),
    /// The requested record does not exist.
    NotFound(String),
    /// A uniqueness constraint rejected a write.
    DuplicateKey(String),
    /// Certificate identifier allocation kept colliding with stored
    /// registrations.
    CertificateIdExhausted {
        /// Number of candidates drawn before giving up.
        attempts: u32,
    },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendUnavailable(msg) => write!(f, "Backend unavailable: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DuplicateKey(msg) => write!(f, "Duplicate key: {msg}"),
            Self::CertificateIdExhausted { attempts } => write!(
                f,
                "Could not allocate a free certificate ID after {attempts} attempts"
            ),
        }
    }
}

impl Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => Self::DuplicateKey(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::BackendUnavailable(err.to_string())
    }
}
