// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::normalize_digits;

#[test]
fn test_persian_digits_normalized() {
    assert_eq!(normalize_digits("۱۹۹۰"), "1990");
}

#[test]
fn test_arabic_indic_digits_normalized() {
    assert_eq!(normalize_digits("١٩٩٠"), "1990");
}

#[test]
fn test_mixed_scripts_normalized() {
    assert_eq!(normalize_digits("۱٩۹٠"), "1990");
}

#[test]
fn test_every_digit_value_preserved_positionally() {
    assert_eq!(normalize_digits("۰۱۲۳۴۵۶۷۸۹"), "0123456789");
    assert_eq!(normalize_digits("٠١٢٣٤٥٦٧٨٩"), "0123456789");
}

#[test]
fn test_non_digit_characters_pass_through() {
    assert_eq!(normalize_digits("تولد ۲۰۰۵"), "تولد 2005");
    assert_eq!(normalize_digits("+98 912 345 6789"), "+98 912 345 6789");
}

#[test]
fn test_length_is_preserved() {
    let input: &str = "۱۲۳۴۵";
    let output: String = normalize_digits(input);
    assert_eq!(input.chars().count(), output.chars().count());
}

#[test]
fn test_empty_input_returns_empty() {
    assert_eq!(normalize_digits(""), "");
}

#[test]
fn test_ascii_input_unchanged() {
    assert_eq!(normalize_digits("2005"), "2005");
    assert_eq!(normalize_digits("no digits at all"), "no digits at all");
}

#[test]
fn test_idempotent() {
    let once: String = normalize_digits("۱۳۸۴");
    let twice: String = normalize_digits(&once);
    assert_eq!(once, twice);
}
