// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::certificate::CertificateId;
use serde::{Deserialize, Serialize};

/// Metadata for an uploaded receipt file, as seen by validation.
///
/// Only the declared content type and byte size participate in the
/// submission rules; the file bytes never enter the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptUpload {
    /// Declared MIME type of the upload.
    pub mime_type: String,
    /// Size of the upload in bytes.
    pub size_bytes: u64,
}

/// A raw registration submission prior to validation.
///
/// Field values arrive exactly as the client sent them; digit-bearing
/// fields may still contain Persian or Arabic-Indic numerals. Missing
/// text fields are represented as empty strings.
#[derive(Debug, Clone, Default)]
pub struct RegistrationSubmission {
    /// Tournament the registrant wants to enter, when the field parsed.
    pub tournament_id: Option<i64>,
    /// Registrant's full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Year of birth as typed, possibly in Persian or Arabic-Indic digits.
    pub year_of_birth: String,
    /// Optional free-text note from the registrant.
    pub description: Option<String>,
    /// Whether the registrant accepted the terms of service.
    pub agreed_tos: bool,
    /// Uploaded receipt metadata, when a file was attached.
    pub receipt: Option<ReceiptUpload>,
}

/// Mutable tournament attributes supplied by the administrator.
///
/// Used for both creation and full-record update. `date` is the
/// authoritative instant; `time` is a venue-local display string edited
/// independently of it, and writers are responsible for keeping the two
/// consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentDraft {
    /// Tournament name.
    pub name: String,
    /// Authoritative instant of the event, canonical UTC string.
    pub date: String,
    /// Human-readable time-of-day display string.
    pub time: String,
    /// Whether registrations are currently accepted.
    pub is_open: bool,
    /// Street address of the venue.
    pub venue_address: String,
    /// Optional extra venue information.
    pub venue_info: Option<String>,
    /// Registration fee display string, currency included.
    pub registration_fee: String,
}

/// A persisted tournament record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// Store-assigned identifier.
    pub tournament_id: i64,
    /// Tournament name.
    pub name: String,
    /// Authoritative instant used for ordering and countdown display.
    pub date: String,
    /// Human-readable time-of-day display string.
    pub time: String,
    /// Whether registrations are currently accepted.
    pub is_open: bool,
    /// Street address of the venue.
    pub venue_address: String,
    /// Optional extra venue information.
    pub venue_info: Option<String>,
    /// Registration fee display string.
    pub registration_fee: String,
    /// Creation instant, canonical UTC string.
    pub created_at: String,
    /// Last-update instant, canonical UTC string.
    pub updated_at: String,
}

/// A validated registration ready for persistence.
///
/// Produced once the submission passed validation, the year of birth was
/// normalized to ASCII digits, and the receipt file was written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    /// Tournament the registration belongs to.
    pub tournament_id: i64,
    /// Registrant's full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Four-digit year of birth.
    pub year_of_birth: u16,
    /// Optional free-text note from the registrant.
    pub description: Option<String>,
    /// Whether the registrant accepted the terms of service.
    pub agreed_tos: bool,
    /// Relative path of the stored receipt file.
    pub receipt_path: String,
}

/// A persisted registration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Store-assigned identifier.
    pub registration_id: i64,
    /// Tournament the registration belongs to.
    pub tournament_id: i64,
    /// Registrant's full name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Four-digit year of birth.
    pub year_of_birth: u16,
    /// Optional free-text note from the registrant.
    pub description: Option<String>,
    /// Whether the registrant accepted the terms of service.
    pub agreed_tos: bool,
    /// Relative path of the stored receipt file.
    pub receipt_path: String,
    /// Issued certificate identifier, unique across all registrations.
    pub certificate_id: CertificateId,
    /// Whether an administrator has confirmed the certificate.
    pub certificate_confirmed: bool,
    /// Creation instant, canonical UTC string.
    pub created_at: String,
}
