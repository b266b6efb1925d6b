// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for registration store tests.

use shatranj_domain::{RegistrationDraft, TournamentDraft};

use crate::Persistence;

/// One store per backend so every test covers both implementations.
pub fn all_backends() -> Vec<Persistence> {
    vec![
        Persistence::new_in_memory(),
        Persistence::new_sqlite_shared_memory().expect("SQLite test store should initialize"),
    ]
}

pub fn sample_tournament_draft() -> TournamentDraft {
    TournamentDraft {
        name: String::from("Spring Open"),
        date: String::from("2026-04-10T09:00:00Z"),
        time: String::from("9:00 AM"),
        is_open: true,
        venue_address: String::from("12 Ferdowsi Ave, Tehran"),
        venue_info: Some(String::from("Hall B, second floor")),
        registration_fee: String::from("500,000 Toman"),
    }
}

pub fn tournament_draft_with(name: &str, date: &str, is_open: bool) -> TournamentDraft {
    TournamentDraft {
        name: String::from(name),
        date: String::from(date),
        is_open,
        ..sample_tournament_draft()
    }
}

pub fn sample_registration_draft(tournament_id: i64) -> RegistrationDraft {
    RegistrationDraft {
        tournament_id,
        name: String::from("Sara Hosseini"),
        phone: String::from("09123456789"),
        email: String::from("sara@example.com"),
        year_of_birth: 1990,
        description: Some(String::from("Lichess: sara_h")),
        agreed_tos: true,
        receipt_path: String::from("2026/2026-04-01/aabbccddeeff0011.jpg"),
    }
}
