// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations for the `SQLite` backend.
//!
//! ## Module Organization
//!
//! - `tournaments` - Tournament create, update, and cascading delete
//! - `registrations` - Registration insert and certificate confirmation
//! - `settings` - Singleton settings row writes

pub mod registrations;
pub mod settings;
pub mod tournaments;

pub use registrations::{confirm_certificate, insert_registration};
pub use settings::set_next_tournament;
pub use tournaments::{create_tournament, delete_tournament, update_tournament};
