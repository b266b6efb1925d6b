// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unit tests for the registration store.
//!
//! Every behavioral test runs against both backends through
//! [`helpers::all_backends`], so the in-memory store and the `SQLite`
//! store are held to the same contract.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod helpers;
