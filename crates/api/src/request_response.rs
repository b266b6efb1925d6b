// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API surface.
//!
//! Requests carry raw caller input; handlers normalize and validate it.
//! Responses serialize, so the HTTP layer can return them as JSON
//! without re-shaping.

use shatranj_domain::{Registration, Tournament};

/// Payload for creating a tournament or replacing one wholesale.
///
/// Updates are full-record: every field is written, there are no
/// partial patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentRequest {
    /// Display name of the tournament.
    pub name: String,
    /// Scheduled date as an RFC 3339 instant; normalized to UTC on intake.
    pub date: String,
    /// Free-form display time, e.g. "9:00 AM".
    pub time: String,
    /// Whether the tournament accepts registrations.
    pub is_open: bool,
    /// Street address of the venue.
    pub venue_address: String,
    /// Extra directions for finding the venue, if any.
    pub venue_info: Option<String>,
    /// Display text for the entry fee.
    pub registration_fee: String,
}

/// Administrator credentials for opening a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Administrator account name.
    pub username: String,
    /// Administrator password, plaintext over the transport.
    pub password: String,
}

/// A tournament as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TournamentInfo {
    /// Identifier of the tournament.
    pub tournament_id: i64,
    /// Display name of the tournament.
    pub name: String,
    /// Scheduled date as a canonical UTC instant.
    pub date: String,
    /// Free-form display time.
    pub time: String,
    /// Whether the tournament accepts registrations.
    pub is_open: bool,
    /// Street address of the venue.
    pub venue_address: String,
    /// Extra directions for finding the venue, if any.
    pub venue_info: Option<String>,
    /// Display text for the entry fee.
    pub registration_fee: String,
    /// When the tournament was created.
    pub created_at: String,
    /// When the tournament was last updated.
    pub updated_at: String,
}

impl From<Tournament> for TournamentInfo {
    fn from(tournament: Tournament) -> Self {
        Self {
            tournament_id: tournament.tournament_id,
            name: tournament.name,
            date: tournament.date,
            time: tournament.time,
            is_open: tournament.is_open,
            venue_address: tournament.venue_address,
            venue_info: tournament.venue_info,
            registration_fee: tournament.registration_fee,
            created_at: tournament.created_at,
            updated_at: tournament.updated_at,
        }
    }
}

/// A registration as returned to the administrator.
///
/// This is the unredacted view, including contact details and the
/// receipt location. It never goes to unauthenticated callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegistrationInfo {
    /// Identifier of the registration.
    pub registration_id: i64,
    /// Tournament the registrant signed up for.
    pub tournament_id: i64,
    /// Registrant's full name.
    pub name: String,
    /// Registrant's phone number.
    pub phone: String,
    /// Registrant's email address.
    pub email: String,
    /// Registrant's year of birth.
    pub year_of_birth: u16,
    /// Free-form note from the registrant, if any.
    pub description: Option<String>,
    /// Whether the registrant accepted the terms of service.
    pub agreed_tos: bool,
    /// Where the payment receipt is stored, relative to the upload root.
    pub receipt_path: String,
    /// Certificate ID issued for this registration.
    pub certificate_id: String,
    /// Whether the administrator confirmed the certificate.
    pub certificate_confirmed: bool,
    /// When the registration was received.
    pub created_at: String,
}

impl From<Registration> for RegistrationInfo {
    fn from(registration: Registration) -> Self {
        Self {
            registration_id: registration.registration_id,
            tournament_id: registration.tournament_id,
            name: registration.name,
            phone: registration.phone,
            email: registration.email,
            year_of_birth: registration.year_of_birth,
            description: registration.description,
            agreed_tos: registration.agreed_tos,
            receipt_path: registration.receipt_path,
            certificate_id: registration.certificate_id.value().to_string(),
            certificate_confirmed: registration.certificate_confirmed,
            created_at: registration.created_at,
        }
    }
}

/// Response to creating a tournament.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTournamentResponse {
    /// The tournament as stored.
    pub tournament: TournamentInfo,
    /// Human-readable confirmation.
    pub message: String,
}

/// Response to updating a tournament.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateTournamentResponse {
    /// The tournament as stored after the update.
    pub tournament: TournamentInfo,
    /// Human-readable confirmation.
    pub message: String,
}

/// Response to deleting a tournament.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteTournamentResponse {
    /// Identifier of the deleted tournament.
    pub tournament_id: i64,
    /// Human-readable confirmation.
    pub message: String,
}

/// Response to fetching a single tournament.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetTournamentResponse {
    /// The requested tournament.
    pub tournament: TournamentInfo,
}

/// Response listing tournaments that accept registrations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenTournamentsResponse {
    /// Open tournaments, soonest first.
    pub tournaments: Vec<TournamentInfo>,
}

/// Response listing every tournament.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllTournamentsResponse {
    /// Tournaments, newest first.
    pub tournaments: Vec<TournamentInfo>,
}

/// Response carrying the featured upcoming tournament.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NextTournamentResponse {
    /// The featured tournament, or `None` when nothing is scheduled.
    pub tournament: Option<TournamentInfo>,
}

/// Response to designating the featured upcoming tournament.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetNextTournamentResponse {
    /// Identifier of the newly featured tournament.
    pub tournament_id: i64,
    /// Human-readable confirmation.
    pub message: String,
}

/// Response to a successful registration submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitRegistrationResponse {
    /// Identifier of the stored registration.
    pub registration_id: i64,
    /// Certificate ID issued to the registrant.
    pub certificate_id: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// Response listing registrations for the administrator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListRegistrationsResponse {
    /// Registrations, newest first.
    pub registrations: Vec<RegistrationInfo>,
}

/// Response to fetching a single registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetRegistrationResponse {
    /// The requested registration.
    pub registration: RegistrationInfo,
}

/// Response to confirming a registrant's certificate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConfirmCertificateResponse {
    /// The registration after confirmation.
    pub registration: RegistrationInfo,
    /// Human-readable confirmation.
    pub message: String,
}

/// Public lookup result for a certificate ID.
///
/// Deliberately thin: no contact details, no receipt location. Anyone
/// holding a certificate ID may call the lookup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerifyCertificateResponse {
    /// The certificate ID that was looked up, in canonical form.
    pub certificate_id: String,
    /// Name of the certificate holder.
    pub name: String,
    /// Tournament the certificate belongs to.
    pub tournament_id: i64,
    /// Name of that tournament, when it still exists.
    pub tournament_name: Option<String>,
    /// Whether the administrator confirmed the certificate.
    pub certificate_confirmed: bool,
}

/// Response to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent administrator requests.
    pub token: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// Response to a logout.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogoutResponse {
    /// Human-readable confirmation.
    pub message: String,
}
