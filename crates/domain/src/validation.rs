// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::numerals::normalize_digits;
use crate::types::RegistrationSubmission;

/// Maximum accepted receipt upload size in bytes (10 MiB).
pub const MAX_RECEIPT_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted for receipt uploads.
pub const ACCEPTED_RECEIPT_TYPES: [&str; 4] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "application/pdf",
];

/// Validates a registration submission against the form rules.
///
/// All rules are evaluated independently so the registrant sees every
/// problem at once, and messages are pushed in a fixed rule order:
/// name, phone, email, year of birth, receipt file, terms agreement,
/// tournament selection. Digit-bearing fields are normalized to ASCII
/// digits before their rules are checked.
///
/// # Arguments
///
/// * `submission` - The raw submission to validate
///
/// # Returns
///
/// The ordered list of violated-rule messages. An empty list means the
/// submission is valid.
#[must_use]
pub fn validate_submission(submission: &RegistrationSubmission) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    // Rule: name must be at least 2 characters after trimming
    if submission.name.trim().chars().count() < 2 {
        errors.push(String::from("Full name must be at least 2 characters."));
    }

    // Rule: phone must be at least 10 characters from the phone character set
    if !is_plausible_phone(&normalize_digits(&submission.phone)) {
        errors.push(String::from(
            "Enter a valid phone number of at least 10 digits.",
        ));
    }

    // Rule: email must contain an @ (syntactic minimum, not full RFC)
    if !submission.email.contains('@') {
        errors.push(String::from("Enter a valid email address."));
    }

    // Rule: year of birth must normalize to exactly 4 ASCII digits
    let year: String = normalize_digits(submission.year_of_birth.trim());
    if year.chars().count() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        errors.push(String::from("Year of birth must be exactly 4 digits."));
    }

    // Rule: receipt file must be present, of an accepted type, and small enough
    match &submission.receipt {
        None => errors.push(String::from("A payment receipt file is required.")),
        Some(receipt) => {
            let mime: String = receipt.mime_type.to_ascii_lowercase();
            if !ACCEPTED_RECEIPT_TYPES.contains(&mime.as_str()) {
                errors.push(String::from("Receipt must be a JPEG, PNG, or PDF file."));
            } else if receipt.size_bytes > MAX_RECEIPT_BYTES {
                errors.push(String::from("Receipt file must be 10 MB or smaller."));
            }
        }
    }

    // Rule: terms of service must be accepted
    if !submission.agreed_tos {
        errors.push(String::from(
            "You must agree to the terms and conditions.",
        ));
    }

    // Rule: a tournament must be selected
    if submission.tournament_id.is_none() {
        errors.push(String::from("Tournament selection is required."));
    }

    errors
}

/// Checks the phone rule: at least 10 characters, drawn only from digits,
/// `+`, `-`, space, and parentheses.
fn is_plausible_phone(phone: &str) -> bool {
    phone.chars().count() >= 10
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}
