// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod certificate;
mod numerals;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use certificate::{CERTIFICATE_ID_LENGTH, CertificateId, CertificateIdError};
pub use numerals::normalize_digits;
pub use types::{
    ReceiptUpload, Registration, RegistrationDraft, RegistrationSubmission, Tournament,
    TournamentDraft,
};
pub use validation::{ACCEPTED_RECEIPT_TYPES, MAX_RECEIPT_BYTES, validate_submission};
