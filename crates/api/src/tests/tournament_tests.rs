// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for tournament administration and the public tournament views.

use shatranj_persistence::Persistence;

use crate::handlers::{
    create_tournament, delete_tournament, get_all_tournaments, get_next_tournament,
    get_open_tournaments, get_tournament, set_next_tournament, update_tournament,
};
use crate::{ApiError, CreateTournamentResponse, TournamentRequest};

use super::helpers::{
    create_open_tournament, create_test_tournament_request, test_store, tournament_request_with,
};

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_tournament_returns_stored_record() {
    let mut persistence: Persistence = test_store();

    let response: CreateTournamentResponse =
        create_tournament(&mut persistence, &create_test_tournament_request()).unwrap();

    assert_eq!(response.tournament.tournament_id, 1);
    assert_eq!(response.tournament.name, "Spring Open");
    assert_eq!(response.tournament.date, "2026-04-10T09:00:00Z");
    assert_eq!(response.tournament.time, "9:00 AM");
    assert!(response.tournament.is_open);
    assert_eq!(response.tournament.venue_address, "12 Ferdowsi Ave, Tehran");
    assert_eq!(
        response.tournament.venue_info,
        Some(String::from("Hall B, second floor"))
    );
    assert_eq!(response.tournament.registration_fee, "500,000 Toman");
    assert_eq!(response.message, "Successfully created tournament 'Spring Open'");
}

#[test]
fn test_create_tournament_normalizes_offset_date() {
    let mut persistence: Persistence = test_store();
    let request: TournamentRequest =
        tournament_request_with("Tehran Blitz", "2026-04-10T12:30:00+03:30", true);

    let response: CreateTournamentResponse =
        create_tournament(&mut persistence, &request).unwrap();

    assert_eq!(response.tournament.date, "2026-04-10T09:00:00Z");
}

#[test]
fn test_create_tournament_trims_fields_and_drops_blank_venue_info() {
    let mut persistence: Persistence = test_store();
    let mut request: TournamentRequest = create_test_tournament_request();
    request.name = String::from("  Spring Open  ");
    request.venue_address = String::from("  12 Ferdowsi Ave, Tehran  ");
    request.venue_info = Some(String::from("   "));

    let response: CreateTournamentResponse =
        create_tournament(&mut persistence, &request).unwrap();

    assert_eq!(response.tournament.name, "Spring Open");
    assert_eq!(response.tournament.venue_address, "12 Ferdowsi Ave, Tehran");
    assert_eq!(response.tournament.venue_info, None);
}

#[test]
fn test_create_tournament_rejects_blank_name() {
    let mut persistence: Persistence = test_store();
    let mut request: TournamentRequest = create_test_tournament_request();
    request.name = String::from("   ");

    let err: ApiError = create_tournament(&mut persistence, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "name"));
}

#[test]
fn test_create_tournament_rejects_unparseable_date() {
    let mut persistence: Persistence = test_store();
    let mut request: TournamentRequest = create_test_tournament_request();
    request.date = String::from("next friday");

    let err: ApiError = create_tournament(&mut persistence, &request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "date"));
}

// ============================================================================
// Update and delete
// ============================================================================

#[test]
fn test_update_tournament_overwrites_fields() {
    let mut persistence: Persistence = test_store();
    let tournament_id: i64 = create_open_tournament(&mut persistence);

    let request: TournamentRequest =
        tournament_request_with("Spring Open (rescheduled)", "2026-05-02T09:00:00Z", false);
    let response = update_tournament(&mut persistence, tournament_id, &request).unwrap();

    assert_eq!(response.tournament.name, "Spring Open (rescheduled)");
    assert_eq!(response.tournament.date, "2026-05-02T09:00:00Z");
    assert!(!response.tournament.is_open);

    let fetched = get_tournament(&mut persistence, tournament_id).unwrap();
    assert_eq!(fetched.tournament, response.tournament);
}

#[test]
fn test_update_unknown_tournament_not_found() {
    let mut persistence: Persistence = test_store();

    let err: ApiError =
        update_tournament(&mut persistence, 999, &create_test_tournament_request()).unwrap_err();

    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Tournament"
    ));
}

#[test]
fn test_delete_tournament_removes_record() {
    let mut persistence: Persistence = test_store();
    let tournament_id: i64 = create_open_tournament(&mut persistence);

    let response = delete_tournament(&mut persistence, tournament_id).unwrap();
    assert_eq!(response.tournament_id, tournament_id);

    let err: ApiError = get_tournament(&mut persistence, tournament_id).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_delete_unknown_tournament_not_found() {
    let mut persistence: Persistence = test_store();

    let err: ApiError = delete_tournament(&mut persistence, 42).unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

// ============================================================================
// Listings
// ============================================================================

#[test]
fn test_open_tournaments_sorted_soonest_first() {
    let mut persistence: Persistence = test_store();
    create_tournament(
        &mut persistence,
        &tournament_request_with("Late Open", "2026-06-01T09:00:00Z", true),
    )
    .unwrap();
    create_tournament(
        &mut persistence,
        &tournament_request_with("Early Open", "2026-03-01T09:00:00Z", true),
    )
    .unwrap();
    create_tournament(
        &mut persistence,
        &tournament_request_with("Members Only", "2026-01-01T09:00:00Z", false),
    )
    .unwrap();

    let response = get_open_tournaments(&mut persistence).unwrap();
    let names: Vec<&str> = response
        .tournaments
        .iter()
        .map(|t| t.name.as_str())
        .collect();

    assert_eq!(names, vec!["Early Open", "Late Open"]);
}

#[test]
fn test_all_tournaments_newest_first() {
    let mut persistence: Persistence = test_store();
    for (name, date) in [
        ("Oldest", "2026-01-01T09:00:00Z"),
        ("Middle", "2026-04-10T09:00:00Z"),
        ("Newest", "2026-07-01T09:00:00Z"),
    ] {
        create_tournament(
            &mut persistence,
            &tournament_request_with(name, date, false),
        )
        .unwrap();
    }

    let response = get_all_tournaments(&mut persistence, None).unwrap();
    let names: Vec<&str> = response
        .tournaments
        .iter()
        .map(|t| t.name.as_str())
        .collect();

    assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
}

#[test]
fn test_all_tournaments_from_filter_is_inclusive_and_normalized() {
    let mut persistence: Persistence = test_store();
    for (name, date) in [
        ("Before", "2026-01-01T09:00:00Z"),
        ("Boundary", "2026-04-10T09:00:00Z"),
        ("After", "2026-07-01T09:00:00Z"),
    ] {
        create_tournament(
            &mut persistence,
            &tournament_request_with(name, date, false),
        )
        .unwrap();
    }

    // Same instant as "Boundary", expressed with a local offset.
    let response =
        get_all_tournaments(&mut persistence, Some("2026-04-10T12:30:00+03:30")).unwrap();
    let names: Vec<&str> = response
        .tournaments
        .iter()
        .map(|t| t.name.as_str())
        .collect();

    assert_eq!(names, vec!["After", "Boundary"]);
}

#[test]
fn test_all_tournaments_rejects_unparseable_from() {
    let mut persistence: Persistence = test_store();

    let err: ApiError = get_all_tournaments(&mut persistence, Some("yesterday")).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "from"));
}

#[test]
fn test_get_unknown_tournament_not_found() {
    let mut persistence: Persistence = test_store();

    let err: ApiError = get_tournament(&mut persistence, 7).unwrap_err();

    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Tournament"
    ));
}

// ============================================================================
// Next-tournament designation
// ============================================================================

#[test]
fn test_next_tournament_defaults_to_none() {
    let mut persistence: Persistence = test_store();

    let response = get_next_tournament(&mut persistence).unwrap();

    assert_eq!(response.tournament, None);
}

#[test]
fn test_set_next_tournament_round_trip() {
    let mut persistence: Persistence = test_store();
    let tournament_id: i64 = create_open_tournament(&mut persistence);

    let response = set_next_tournament(&mut persistence, tournament_id).unwrap();
    assert_eq!(
        response.message,
        "Successfully set 'Spring Open' as the next tournament"
    );

    let next = get_next_tournament(&mut persistence).unwrap();
    assert_eq!(
        next.tournament.map(|t| t.tournament_id),
        Some(tournament_id)
    );
}

#[test]
fn test_set_next_unknown_tournament_not_found() {
    let mut persistence: Persistence = test_store();

    let err: ApiError = set_next_tournament(&mut persistence, 999).unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_next_tournament_cleared_by_deletion() {
    let mut persistence: Persistence = test_store();
    let tournament_id: i64 = create_open_tournament(&mut persistence);
    set_next_tournament(&mut persistence, tournament_id).unwrap();

    delete_tournament(&mut persistence, tournament_id).unwrap();

    let response = get_next_tournament(&mut persistence).unwrap();
    assert_eq!(response.tournament, None);
}
