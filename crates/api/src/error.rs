// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! [`AuthError`] covers credential and session checks, [`ApiError`] is
//! everything a handler can hand back to the transport layer. The HTTP
//! server decides status codes; these types only carry the facts.

use std::error::Error;
use std::fmt;

/// Errors from authentication operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials or session token did not check out.
    ///
    /// The reason is intentionally the same for a wrong username and a
    /// wrong password so the response does not confirm which one exists.
    AuthenticationFailed {
        /// Human-readable reason for the failure.
        reason: String,
    },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl Error for AuthError {}

/// Errors surfaced to API consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Credentials or session token did not check out.
    AuthenticationFailed {
        /// Human-readable reason for the failure.
        reason: String,
    },
    /// A registration form failed one or more validation rules.
    ///
    /// Every violated rule is listed so the registrant can fix the whole
    /// form in one pass instead of resubmitting rule by rule.
    ValidationFailed {
        /// One message per violated rule.
        errors: Vec<String>,
    },
    /// A single field of a request could not be used as given.
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },
    /// The requested record does not exist.
    ResourceNotFound {
        /// Kind of record that was looked up, e.g. "Tournament".
        resource_type: String,
        /// Details about what was requested.
        message: String,
    },
    /// An unexpected failure inside the service.
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => {
                Self::AuthenticationFailed { reason }
            }
        }
    }
}
