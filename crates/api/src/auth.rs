// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrator authentication and session management.
//!
//! The service knows exactly one administrator account, configured at
//! startup. Sessions are process-local bearer tokens with a fixed
//! lifetime; restarting the server logs everyone out.

use std::collections::HashMap;

use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::AuthError;

/// How long a session stays valid after login.
const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

/// Failure reason shared by wrong-username and wrong-password logins.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Validates administrator credentials and tracks live sessions.
pub struct AuthenticationService {
    admin_username: String,
    admin_password_hash: String,
    sessions: HashMap<String, OffsetDateTime>,
}

impl AuthenticationService {
    /// Creates the service for the single administrator account.
    ///
    /// The password is hashed immediately; the plaintext is not kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the password cannot be hashed.
    pub fn new(admin_username: &str, admin_password: &str) -> Result<Self, AuthError> {
        let admin_password_hash: String = bcrypt::hash(admin_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to hash administrator password: {e}"),
            })?;

        Ok(Self {
            admin_username: admin_username.to_string(),
            admin_password_hash,
            sessions: HashMap::new(),
        })
    }

    /// Checks credentials and opens a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the username or password is wrong. Both cases
    /// produce the same reason string.
    pub fn login(&mut self, username: &str, password: &str) -> Result<String, AuthError> {
        if username != self.admin_username {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from(INVALID_CREDENTIALS),
            });
        }

        let password_matches: bool = bcrypt::verify(password, &self.admin_password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification failed: {e}"),
            })?;
        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from(INVALID_CREDENTIALS),
            });
        }

        let token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime = OffsetDateTime::now_utc() + DEFAULT_SESSION_EXPIRATION;
        self.sessions.insert(token.clone(), expires_at);
        info!("Administrator '{}' logged in", username);
        Ok(token)
    }

    /// Checks that a session token is known and not expired.
    ///
    /// Expired sessions are removed on the spot, so a later retry with
    /// the same token fails as unknown rather than expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or the session expired.
    pub fn validate_session(&mut self, token: &str) -> Result<(), AuthError> {
        let Some(expires_at) = self.sessions.get(token) else {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            });
        };

        if *expires_at <= OffsetDateTime::now_utc() {
            self.sessions.remove(token);
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        Ok(())
    }

    /// Ends a session. Unknown tokens are ignored so logout is idempotent.
    pub fn logout(&mut self, token: &str) {
        if self.sessions.remove(token).is_some() {
            debug!("Session revoked on logout");
        }
    }

    /// Generate a unique session token
    fn generate_session_token() -> String {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Plants a session with a chosen expiry. Test-only.
    #[cfg(test)]
    pub(crate) fn insert_session(&mut self, token: &str, expires_at: OffsetDateTime) {
        self.sessions.insert(token.to_string(), expires_at);
    }
}
