// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use shatranj_domain::{ReceiptUpload, RegistrationSubmission};
use shatranj_persistence::Persistence;

use crate::handlers;
use crate::{AuthenticationService, SubmitRegistrationResponse, TournamentRequest};

pub fn test_store() -> Persistence {
    Persistence::new_in_memory()
}

pub fn create_test_auth() -> AuthenticationService {
    AuthenticationService::new("admin", "correct-horse-battery").unwrap()
}

pub fn create_test_tournament_request() -> TournamentRequest {
    TournamentRequest {
        name: String::from("Spring Open"),
        date: String::from("2026-04-10T09:00:00Z"),
        time: String::from("9:00 AM"),
        is_open: true,
        venue_address: String::from("12 Ferdowsi Ave, Tehran"),
        venue_info: Some(String::from("Hall B, second floor")),
        registration_fee: String::from("500,000 Toman"),
    }
}

pub fn tournament_request_with(name: &str, date: &str, is_open: bool) -> TournamentRequest {
    TournamentRequest {
        name: String::from(name),
        date: String::from(date),
        is_open,
        ..create_test_tournament_request()
    }
}

pub fn create_open_tournament(persistence: &mut Persistence) -> i64 {
    handlers::create_tournament(persistence, &create_test_tournament_request())
        .unwrap()
        .tournament
        .tournament_id
}

pub fn create_closed_tournament(persistence: &mut Persistence) -> i64 {
    let request: TournamentRequest =
        tournament_request_with("Closed Cup", "2026-05-01T09:00:00Z", false);
    handlers::create_tournament(persistence, &request)
        .unwrap()
        .tournament
        .tournament_id
}

pub fn create_test_submission(tournament_id: i64) -> RegistrationSubmission {
    RegistrationSubmission {
        tournament_id: Some(tournament_id),
        name: String::from("Sara Hosseini"),
        phone: String::from("0912 345 6789"),
        email: String::from("sara@example.com"),
        year_of_birth: String::from("1990"),
        description: Some(String::from("Lichess: sara_h")),
        agreed_tos: true,
        receipt: Some(ReceiptUpload {
            mime_type: String::from("image/jpeg"),
            size_bytes: 204_800,
        }),
    }
}

pub fn test_receipt_path() -> String {
    String::from("2026/2026-04-01/aabbccddeeff0011.jpg")
}

pub fn submit_test_registration(
    persistence: &mut Persistence,
    tournament_id: i64,
) -> SubmitRegistrationResponse {
    handlers::submit_registration(
        persistence,
        &create_test_submission(tournament_id),
        test_receipt_path(),
    )
    .unwrap()
}

/// Rewrites ASCII digits as Extended Arabic-Indic digits, the way an
/// Iranian keyboard layout types them.
pub fn persianize_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '0' => '۰',
            '1' => '۱',
            '2' => '۲',
            '3' => '۳',
            '4' => '۴',
            '5' => '۵',
            '6' => '۶',
            '7' => '۷',
            '8' => '۸',
            '9' => '۹',
            other => other,
        })
        .collect()
}
