// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical instant encoding shared by every backend.
//!
//! Instants are persisted as whole-second UTC text in the form
//! `YYYY-MM-DDThh:mm:ssZ`. Lexicographic ordering of stored values matches
//! chronological ordering, so both backends sort and filter on plain
//! string comparison.

use time::OffsetDateTime;
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;

/// Formats an instant into the canonical stored form.
///
/// The value is converted to UTC and truncated to whole seconds before
/// formatting.
#[must_use]
pub fn format_instant(instant: OffsetDateTime) -> String {
    let utc: OffsetDateTime = instant.to_offset(UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        utc.year(),
        u8::from(utc.month()),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second()
    )
}

/// Parses an RFC 3339 instant, accepting any UTC offset.
///
/// # Errors
///
/// Returns the underlying parse error when the input is not a valid
/// RFC 3339 instant.
pub fn parse_instant(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339)
}
