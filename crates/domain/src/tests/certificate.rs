// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CERTIFICATE_ID_LENGTH, CertificateId, CertificateIdError};
use std::str::FromStr;

fn assert_well_formed(id: &CertificateId) {
    let value: &str = id.value();
    assert_eq!(value.chars().count(), CERTIFICATE_ID_LENGTH);
    assert!(value.chars().take(5).all(|c| c.is_ascii_digit()));
    assert!(value.chars().skip(5).all(|c| c.is_ascii_uppercase()));
}

#[test]
fn test_generated_ids_match_required_shape() {
    for _ in 0..200 {
        let id: CertificateId = CertificateId::generate();
        assert_well_formed(&id);
    }
}

#[test]
fn test_generated_id_round_trips_through_parse() {
    let id: CertificateId = CertificateId::generate();
    let parsed: CertificateId = CertificateId::from_str(id.value()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_parse_accepts_valid_id() {
    let id: CertificateId = CertificateId::parse("12345ABCDE").unwrap();
    assert_eq!(id.value(), "12345ABCDE");
}

#[test]
fn test_parse_uppercases_letters() {
    let id: CertificateId = CertificateId::parse("12345abcde").unwrap();
    assert_eq!(id.value(), "12345ABCDE");
}

#[test]
fn test_parse_rejects_short_input() {
    let result: Result<CertificateId, CertificateIdError> = CertificateId::parse("12345");
    assert_eq!(
        result,
        Err(CertificateIdError::WrongLength {
            expected: 10,
            found: 5
        })
    );
}

#[test]
fn test_parse_rejects_long_input() {
    let result: Result<CertificateId, CertificateIdError> = CertificateId::parse("12345ABCDEF");
    assert_eq!(
        result,
        Err(CertificateIdError::WrongLength {
            expected: 10,
            found: 11
        })
    );
}

#[test]
fn test_parse_rejects_empty_input() {
    let result: Result<CertificateId, CertificateIdError> = CertificateId::parse("");
    assert_eq!(
        result,
        Err(CertificateIdError::WrongLength {
            expected: 10,
            found: 0
        })
    );
}

#[test]
fn test_parse_rejects_letters_before_digits() {
    let result: Result<CertificateId, CertificateIdError> = CertificateId::parse("ABCDE12345");
    assert_eq!(result, Err(CertificateIdError::MalformedShape));
}

#[test]
fn test_parse_rejects_non_ascii_digits() {
    let result: Result<CertificateId, CertificateIdError> = CertificateId::parse("۱۲۳۴۵ABCDE");
    assert_eq!(result, Err(CertificateIdError::MalformedShape));
}

#[test]
fn test_parse_rejects_punctuation_in_letter_block() {
    let result: Result<CertificateId, CertificateIdError> = CertificateId::parse("12345ABC-E");
    assert_eq!(result, Err(CertificateIdError::MalformedShape));
}

#[test]
fn test_display_matches_value() {
    let id: CertificateId = CertificateId::parse("00001zzzzz").unwrap();
    assert_eq!(format!("{id}"), "00001ZZZZZ");
}
