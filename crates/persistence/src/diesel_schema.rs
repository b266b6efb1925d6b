// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel schema for the registration store tables.
//!
//! Boolean columns are stored as `Integer` (0/1) and instants as `Text`
//! in the canonical encoding described in [`crate::instant`].

diesel::table! {
    tournaments (id) {
        id -> BigInt,
        name -> Text,
        date -> Text,
        time -> Text,
        is_open -> Integer,
        venue_address -> Text,
        venue_info -> Nullable<Text>,
        registration_fee -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    registrations (id) {
        id -> BigInt,
        tournament_id -> BigInt,
        name -> Text,
        phone -> Text,
        email -> Text,
        year_of_birth -> Integer,
        description -> Nullable<Text>,
        agreed_tos -> Integer,
        receipt_path -> Text,
        certificate_id -> Text,
        certificate_confirmed -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    app_settings (id) {
        id -> BigInt,
        next_tournament_id -> Nullable<BigInt>,
        updated_at -> Text,
    }
}

diesel::joinable!(registrations -> tournaments (tournament_id));

diesel::allow_tables_to_appear_in_same_query!(app_settings, registrations, tournaments,);
