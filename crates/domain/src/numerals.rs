// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Digit normalization for Persian and Arabic-Indic numerals.
//!
//! Registration forms are filled in from Persian and Arabic keyboard
//! layouts, where digits arrive as U+06F0..U+06F9 or U+0660..U+0669
//! rather than ASCII. Everything downstream of the form handler works
//! with ASCII digits only.

/// Replaces every Persian and Arabic-Indic digit in `input` with its
/// ASCII equivalent.
///
/// All other characters pass through unchanged, so the function is total
/// and idempotent; already-ASCII input comes back as-is.
///
/// # Arguments
///
/// * `input` - The string to normalize
#[must_use]
pub fn normalize_digits(input: &str) -> String {
    input.chars().map(ascii_digit).collect()
}

/// Maps a single Persian (U+06F0..U+06F9) or Arabic-Indic (U+0660..U+0669)
/// digit to its ASCII counterpart; every other character maps to itself.
const fn ascii_digit(c: char) -> char {
    match c {
        '۰' | '٠' => '0',
        '۱' | '١' => '1',
        '۲' | '٢' => '2',
        '۳' | '٣' => '3',
        '۴' | '٤' => '4',
        '۵' | '٥' => '5',
        '۶' | '٦' => '6',
        '۷' | '٧' => '7',
        '۸' | '٨' => '8',
        '۹' | '٩' => '9',
        _ => c,
    }
}
