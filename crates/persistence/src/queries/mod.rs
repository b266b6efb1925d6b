// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read operations for the `SQLite` backend.
//!
//! ## Module Organization
//!
//! - `tournaments` - Tournament lookups and ordered listings
//! - `registrations` - Registration lookups, listings, and certificate
//!   checks
//! - `settings` - Singleton settings row reads

pub mod registrations;
pub mod settings;
pub mod tournaments;

pub use registrations::{
    certificate_id_exists, get_registration, get_registration_by_certificate, get_registrations,
};
pub use settings::get_next_tournament_id;
pub use tournaments::{get_all_tournaments, get_open_tournaments, get_tournament};
