// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Certificate identifier generation and parsing.
//!
//! Every registration is issued a 10-character certificate identifier
//! that participants later use for public verification.

use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Number of leading decimal digits in a certificate identifier.
const DIGIT_COUNT: usize = 5;

/// Number of trailing uppercase letters in a certificate identifier.
const LETTER_COUNT: usize = 5;

/// Total length of a certificate identifier.
pub const CERTIFICATE_ID_LENGTH: usize = DIGIT_COUNT + LETTER_COUNT;

/// Certificate identifier parse errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CertificateIdError {
    /// Input is not exactly 10 characters long.
    #[error("Certificate ID must be exactly {expected} characters long, got {found}")]
    WrongLength { expected: usize, found: usize },

    /// Input has the right length but is not 5 digits followed by 5 letters.
    #[error("Certificate ID must be 5 digits followed by 5 letters")]
    MalformedShape,
}

/// A registration certificate identifier.
///
/// Identifiers are 5 decimal digits followed by 5 uppercase ASCII letters,
/// e.g. `04931QTZRK`. An identifier is assigned once at registration time
/// and never mutated afterwards. Uniqueness is not a property of the value
/// itself; the registration store checks candidates against all previously
/// issued identifiers before accepting one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId {
    /// The identifier value (exactly 10 characters).
    value: String,
}

impl CertificateId {
    /// Generates a random candidate identifier.
    ///
    /// The digit block is drawn uniformly from 00000-99999 (zero-padded)
    /// and each letter uniformly from A-Z. The result is only a candidate;
    /// callers must check it for uniqueness before issuing it.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let digits: u32 = rng.random_range(0..100_000);
        let letters: String = (0..LETTER_COUNT)
            .map(|_| char::from(b'A' + rng.random_range(0..26u8)))
            .collect();
        Self {
            value: format!("{digits:05}{letters}"),
        }
    }

    /// Parses an identifier, normalizing lowercase letters to uppercase.
    ///
    /// # Arguments
    ///
    /// * `input` - The candidate identifier text
    ///
    /// # Errors
    ///
    /// Returns `CertificateIdError::WrongLength` if the input is not exactly
    /// 10 characters, or `CertificateIdError::MalformedShape` if it is not
    /// 5 ASCII digits followed by 5 ASCII letters.
    pub fn parse(input: &str) -> Result<Self, CertificateIdError> {
        let length: usize = input.chars().count();
        if length != CERTIFICATE_ID_LENGTH {
            return Err(CertificateIdError::WrongLength {
                expected: CERTIFICATE_ID_LENGTH,
                found: length,
            });
        }

        let normalized: String = input.to_uppercase();
        let digits_ok: bool = normalized
            .chars()
            .take(DIGIT_COUNT)
            .all(|c| c.is_ascii_digit());
        let letters_ok: bool = normalized
            .chars()
            .skip(DIGIT_COUNT)
            .all(|c| c.is_ascii_uppercase());
        if !digits_ok || !letters_ok {
            return Err(CertificateIdError::MalformedShape);
        }

        Ok(Self { value: normalized })
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for CertificateId {
    type Err = CertificateIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
