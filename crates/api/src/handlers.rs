// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers for tournament registration operations.
//!
//! Handlers are transport-free: they take the registration store (and,
//! for sessions, the authentication service) plus plain request values,
//! and return response types or [`ApiError`]. The HTTP layer owns status
//! codes, authentication extraction, and file handling; by the time a
//! handler runs, any required session check has already passed.

use shatranj_domain::{
    CertificateId, Registration, RegistrationDraft, RegistrationSubmission, Tournament,
    TournamentDraft, normalize_digits, validate_submission as validate_submission_fields,
};
use shatranj_persistence::{Persistence, PersistenceError, format_instant, parse_instant};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::request_response::{
    AllTournamentsResponse, ConfirmCertificateResponse, CreateTournamentResponse,
    DeleteTournamentResponse, GetRegistrationResponse, GetTournamentResponse,
    ListRegistrationsResponse, LoginRequest, LoginResponse, LogoutResponse,
    NextTournamentResponse, OpenTournamentsResponse, RegistrationInfo,
    SetNextTournamentResponse, SubmitRegistrationResponse, TournamentInfo, TournamentRequest,
    UpdateTournamentResponse, VerifyCertificateResponse,
};

// ============================================================================
// Error mapping
// ============================================================================

fn internal_error(context: &str, err: &PersistenceError) -> ApiError {
    ApiError::Internal {
        message: format!("{context}: {err}"),
    }
}

/// Maps a store failure from an operation that targets one record.
///
/// `NotFound` becomes a [`ApiError::ResourceNotFound`] of the given
/// resource type; everything else is internal.
fn map_store_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        other => ApiError::Internal {
            message: format!("Storage error: {other}"),
        },
    }
}

fn tournament_not_found(tournament_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Tournament"),
        message: format!("Tournament with ID {tournament_id} not found"),
    }
}

/// Parses a caller-supplied instant and re-renders it in canonical form.
///
/// Accepts any RFC 3339 offset; the result is always the whole-second
/// UTC rendering the store orders by.
fn canonicalize_instant(raw: &str, field: &str) -> Result<String, ApiError> {
    let trimmed: &str = raw.trim();
    let parsed: OffsetDateTime = parse_instant(trimmed).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse '{trimmed}' as an RFC 3339 instant: {e}"),
    })?;
    Ok(format_instant(parsed))
}

// ============================================================================
// Tournament queries
// ============================================================================

/// Lists tournaments currently accepting registrations, soonest first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_open_tournaments(
    persistence: &mut Persistence,
) -> Result<OpenTournamentsResponse, ApiError> {
    let tournaments: Vec<TournamentInfo> = persistence
        .get_open_tournaments()
        .map_err(|e| internal_error("Failed to list open tournaments", &e))?
        .into_iter()
        .map(TournamentInfo::from)
        .collect();
    Ok(OpenTournamentsResponse { tournaments })
}

/// Lists every tournament, newest first.
///
/// # Arguments
///
/// * `persistence` - The registration store
/// * `from_date` - Optional RFC 3339 lower bound; tournaments on or after
///   this instant are included
///
/// # Errors
///
/// Returns an error if `from_date` is not a parseable instant or the
/// store cannot be read.
pub fn get_all_tournaments(
    persistence: &mut Persistence,
    from_date: Option<&str>,
) -> Result<AllTournamentsResponse, ApiError> {
    let canonical_from: Option<String> = from_date
        .map(|raw| canonicalize_instant(raw, "from"))
        .transpose()?;

    let tournaments: Vec<TournamentInfo> = persistence
        .get_all_tournaments(canonical_from.as_deref())
        .map_err(|e| internal_error("Failed to list tournaments", &e))?
        .into_iter()
        .map(TournamentInfo::from)
        .collect();
    Ok(AllTournamentsResponse { tournaments })
}

/// Fetches one tournament by ID.
///
/// # Errors
///
/// Returns an error if the tournament does not exist or the store cannot
/// be read.
pub fn get_tournament(
    persistence: &mut Persistence,
    tournament_id: i64,
) -> Result<GetTournamentResponse, ApiError> {
    let tournament: Tournament = persistence
        .get_tournament(tournament_id)
        .map_err(|e| internal_error("Failed to look up tournament", &e))?
        .ok_or_else(|| tournament_not_found(tournament_id))?;
    Ok(GetTournamentResponse {
        tournament: TournamentInfo::from(tournament),
    })
}

/// Fetches the featured upcoming tournament, if one is designated.
///
/// A stale designation (pointing at a deleted tournament) reads as no
/// featured tournament rather than an error.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_next_tournament(
    persistence: &mut Persistence,
) -> Result<NextTournamentResponse, ApiError> {
    let tournament: Option<Tournament> = persistence
        .get_next_tournament()
        .map_err(|e| internal_error("Failed to look up the next tournament", &e))?;
    Ok(NextTournamentResponse {
        tournament: tournament.map(TournamentInfo::from),
    })
}

// ============================================================================
// Tournament administration
// ============================================================================

fn tournament_draft_from(request: &TournamentRequest) -> Result<TournamentDraft, ApiError> {
    let name: &str = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Tournament name must not be empty"),
        });
    }

    Ok(TournamentDraft {
        name: name.to_string(),
        date: canonicalize_instant(&request.date, "date")?,
        time: request.time.trim().to_string(),
        is_open: request.is_open,
        venue_address: request.venue_address.trim().to_string(),
        venue_info: request
            .venue_info
            .as_ref()
            .map(|info| info.trim().to_string())
            .filter(|info| !info.is_empty()),
        registration_fee: request.registration_fee.trim().to_string(),
    })
}

/// Creates a tournament from administrator input.
///
/// The date is normalized to the canonical UTC rendering before storage,
/// so a date entered with a local offset compares correctly against
/// every other tournament.
///
/// # Arguments
///
/// * `persistence` - The registration store
/// * `request` - The tournament attributes
///
/// # Errors
///
/// Returns an error if the name is empty, the date cannot be parsed, or
/// the store rejects the write.
pub fn create_tournament(
    persistence: &mut Persistence,
    request: &TournamentRequest,
) -> Result<CreateTournamentResponse, ApiError> {
    let draft: TournamentDraft = tournament_draft_from(request)?;
    let tournament: Tournament = persistence
        .create_tournament(&draft)
        .map_err(|e| internal_error("Failed to create tournament", &e))?;

    info!(
        "Created tournament {} '{}'",
        tournament.tournament_id, tournament.name
    );
    let message: String = format!("Successfully created tournament '{}'", tournament.name);
    Ok(CreateTournamentResponse {
        tournament: TournamentInfo::from(tournament),
        message,
    })
}

/// Replaces a tournament's attributes wholesale.
///
/// # Errors
///
/// Returns an error if the tournament does not exist, the name is empty,
/// the date cannot be parsed, or the store rejects the write.
pub fn update_tournament(
    persistence: &mut Persistence,
    tournament_id: i64,
    request: &TournamentRequest,
) -> Result<UpdateTournamentResponse, ApiError> {
    let draft: TournamentDraft = tournament_draft_from(request)?;
    let tournament: Tournament = persistence
        .update_tournament(tournament_id, &draft)
        .map_err(|e| map_store_error(e, "Tournament"))?;

    info!("Updated tournament {}", tournament_id);
    Ok(UpdateTournamentResponse {
        tournament: TournamentInfo::from(tournament),
        message: format!("Successfully updated tournament {tournament_id}"),
    })
}

/// Deletes a tournament together with all of its registrations.
///
/// # Errors
///
/// Returns an error if the tournament does not exist or the store
/// rejects the delete.
pub fn delete_tournament(
    persistence: &mut Persistence,
    tournament_id: i64,
) -> Result<DeleteTournamentResponse, ApiError> {
    persistence
        .delete_tournament(tournament_id)
        .map_err(|e| map_store_error(e, "Tournament"))?;

    info!("Deleted tournament {} and its registrations", tournament_id);
    Ok(DeleteTournamentResponse {
        tournament_id,
        message: format!("Successfully deleted tournament {tournament_id} and its registrations"),
    })
}

/// Designates the tournament featured on the landing page.
///
/// The target must exist at designation time. It may be deleted later;
/// the stale designation then reads as no featured tournament.
///
/// # Errors
///
/// Returns an error if the tournament does not exist or the store
/// rejects the write.
pub fn set_next_tournament(
    persistence: &mut Persistence,
    tournament_id: i64,
) -> Result<SetNextTournamentResponse, ApiError> {
    let tournament: Tournament = persistence
        .get_tournament(tournament_id)
        .map_err(|e| internal_error("Failed to look up tournament", &e))?
        .ok_or_else(|| tournament_not_found(tournament_id))?;

    persistence
        .set_next_tournament(tournament_id)
        .map_err(|e| internal_error("Failed to set the next tournament", &e))?;

    info!(
        "Tournament {} '{}' is now the next tournament",
        tournament_id, tournament.name
    );
    Ok(SetNextTournamentResponse {
        tournament_id,
        message: format!("Successfully set '{}' as the next tournament", tournament.name),
    })
}

// ============================================================================
// Registration intake
// ============================================================================

/// Checks a submission against the form rules and the target
/// tournament's state without persisting anything.
///
/// Rule violations are collected into one [`ApiError::ValidationFailed`]
/// so the registrant sees every problem at once. A tournament that is
/// closed for registration is reported the same way; a tournament that
/// does not exist at all is a [`ApiError::ResourceNotFound`].
///
/// # Errors
///
/// Returns an error if any rule is violated, the selected tournament
/// does not exist, or the store cannot be read.
pub fn validate_submission(
    persistence: &mut Persistence,
    submission: &RegistrationSubmission,
) -> Result<(), ApiError> {
    let mut errors: Vec<String> = validate_submission_fields(submission);

    if let Some(tournament_id) = submission.tournament_id {
        let tournament: Tournament = persistence
            .get_tournament(tournament_id)
            .map_err(|e| internal_error("Failed to look up tournament", &e))?
            .ok_or_else(|| tournament_not_found(tournament_id))?;
        if !tournament.is_open {
            errors.push(String::from(
                "Registration for this tournament is closed.",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ValidationFailed { errors })
    }
}

/// Builds the storable draft from a submission that already validated.
///
/// The guards here cannot fire after [`validate_submission`] passes;
/// they keep the conversion total instead of panicking.
fn registration_draft_from(
    submission: &RegistrationSubmission,
    receipt_path: String,
) -> Result<RegistrationDraft, ApiError> {
    let Some(tournament_id) = submission.tournament_id else {
        return Err(ApiError::Internal {
            message: String::from("Submission reached drafting without a tournament ID"),
        });
    };

    let year_of_birth: u16 = normalize_digits(submission.year_of_birth.trim())
        .parse()
        .map_err(|_| ApiError::Internal {
            message: String::from("Submission reached drafting with a malformed year of birth"),
        })?;

    Ok(RegistrationDraft {
        tournament_id,
        name: submission.name.trim().to_string(),
        phone: normalize_digits(submission.phone.trim()),
        email: submission.email.trim().to_string(),
        year_of_birth,
        description: submission
            .description
            .as_ref()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()),
        agreed_tos: submission.agreed_tos,
        receipt_path,
    })
}

/// Accepts a registration and issues its certificate ID.
///
/// The submission is re-validated here even when the caller already ran
/// [`validate_submission`], so a tournament closing between the two
/// calls still rejects the registration. Digit-bearing fields are
/// stored in their ASCII-digit normalization.
///
/// # Arguments
///
/// * `persistence` - The registration store
/// * `submission` - The raw form input
/// * `receipt_path` - Where the transport layer stored the receipt file,
///   relative to the upload root
///
/// # Errors
///
/// Returns an error if validation fails, the tournament does not exist,
/// or the store rejects the write.
pub fn submit_registration(
    persistence: &mut Persistence,
    submission: &RegistrationSubmission,
    receipt_path: String,
) -> Result<SubmitRegistrationResponse, ApiError> {
    validate_submission(persistence, submission)?;
    let draft: RegistrationDraft = registration_draft_from(submission, receipt_path)?;

    let registration: Registration = persistence
        .create_registration(&draft)
        .map_err(|e| map_store_error(e, "Tournament"))?;

    info!(
        "Registration {} stored for tournament {} with certificate ID {}",
        registration.registration_id,
        registration.tournament_id,
        registration.certificate_id.value()
    );
    Ok(SubmitRegistrationResponse {
        registration_id: registration.registration_id,
        certificate_id: registration.certificate_id.value().to_string(),
        message: format!("Successfully registered '{}'", registration.name),
    })
}

// ============================================================================
// Certificate lookup
// ============================================================================

/// Looks up a certificate ID for public verification.
///
/// The input is trimmed, digit-normalized, and uppercased before the
/// lookup, so an ID read aloud and retyped in lowercase or with Persian
/// numerals still resolves. The response carries no contact details.
///
/// # Errors
///
/// Returns an error if the input is not shaped like a certificate ID,
/// no registration holds it, or the store cannot be read.
pub fn verify_certificate(
    persistence: &mut Persistence,
    raw_certificate_id: &str,
) -> Result<VerifyCertificateResponse, ApiError> {
    let normalized: String = normalize_digits(raw_certificate_id.trim());
    let certificate_id: CertificateId =
        CertificateId::parse(&normalized).map_err(|e| ApiError::InvalidInput {
            field: String::from("certificate_id"),
            message: e.to_string(),
        })?;

    let registration: Registration = persistence
        .get_registration_by_certificate(&certificate_id)
        .map_err(|e| internal_error("Failed to look up certificate", &e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Certificate"),
            message: format!(
                "No registration holds certificate ID {}",
                certificate_id.value()
            ),
        })?;

    let tournament_name: Option<String> = persistence
        .get_tournament(registration.tournament_id)
        .map_err(|e| internal_error("Failed to look up tournament", &e))?
        .map(|tournament| tournament.name);

    Ok(VerifyCertificateResponse {
        certificate_id: registration.certificate_id.value().to_string(),
        name: registration.name,
        tournament_id: registration.tournament_id,
        tournament_name,
        certificate_confirmed: registration.certificate_confirmed,
    })
}

// ============================================================================
// Registration administration
// ============================================================================

/// Lists registrations for the administrator, newest first.
///
/// # Arguments
///
/// * `persistence` - The registration store
/// * `tournament_id` - Optional filter; only registrations for this
///   tournament are returned
///
/// # Errors
///
/// Returns an error if the filter names a tournament that does not exist
/// or the store cannot be read.
pub fn get_registrations(
    persistence: &mut Persistence,
    tournament_id: Option<i64>,
) -> Result<ListRegistrationsResponse, ApiError> {
    if let Some(id) = tournament_id {
        persistence
            .get_tournament(id)
            .map_err(|e| internal_error("Failed to look up tournament", &e))?
            .ok_or_else(|| tournament_not_found(id))?;
    }

    let registrations: Vec<RegistrationInfo> = persistence
        .get_registrations(tournament_id)
        .map_err(|e| internal_error("Failed to list registrations", &e))?
        .into_iter()
        .map(RegistrationInfo::from)
        .collect();
    Ok(ListRegistrationsResponse { registrations })
}

/// Fetches one registration by ID.
///
/// # Errors
///
/// Returns an error if the registration does not exist or the store
/// cannot be read.
pub fn get_registration(
    persistence: &mut Persistence,
    registration_id: i64,
) -> Result<GetRegistrationResponse, ApiError> {
    let registration: Registration = persistence
        .get_registration(registration_id)
        .map_err(|e| internal_error("Failed to look up registration", &e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Registration"),
            message: format!("Registration with ID {registration_id} not found"),
        })?;
    Ok(GetRegistrationResponse {
        registration: RegistrationInfo::from(registration),
    })
}

/// Marks a registration's certificate as confirmed.
///
/// Confirming an already-confirmed certificate succeeds and changes
/// nothing.
///
/// # Errors
///
/// Returns an error if the registration does not exist or the store
/// rejects the write.
pub fn confirm_certificate(
    persistence: &mut Persistence,
    registration_id: i64,
) -> Result<ConfirmCertificateResponse, ApiError> {
    let registration: Registration = persistence
        .confirm_certificate(registration_id)
        .map_err(|e| map_store_error(e, "Registration"))?;

    info!(
        "Certificate {} confirmed for registration {}",
        registration.certificate_id.value(),
        registration_id
    );
    let message: String = format!(
        "Successfully confirmed certificate {}",
        registration.certificate_id.value()
    );
    Ok(ConfirmCertificateResponse {
        registration: RegistrationInfo::from(registration),
        message,
    })
}

// ============================================================================
// Sessions
// ============================================================================

/// Opens an administrator session.
///
/// # Errors
///
/// Returns an error if the credentials are wrong.
pub fn login(
    auth: &mut AuthenticationService,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let token: String = auth.login(&request.username, &request.password)?;
    Ok(LoginResponse {
        token,
        message: String::from("Login successful"),
    })
}

/// Ends an administrator session. Always succeeds.
pub fn logout(auth: &mut AuthenticationService, token: &str) -> LogoutResponse {
    auth.logout(token);
    LogoutResponse {
        message: String::from("Logged out"),
    }
}
