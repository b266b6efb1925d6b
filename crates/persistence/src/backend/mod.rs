// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific database plumbing.
//!
//! Only `SQLite` goes through Diesel. The in-memory backend lives in
//! [`crate::memory`] and needs no connection setup.

pub mod sqlite;
