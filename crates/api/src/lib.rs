// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod error;
pub mod handlers;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::AuthenticationService;
pub use error::{ApiError, AuthError};
pub use request_response::{
    AllTournamentsResponse, ConfirmCertificateResponse, CreateTournamentResponse,
    DeleteTournamentResponse, GetRegistrationResponse, GetTournamentResponse,
    ListRegistrationsResponse, LoginRequest, LoginResponse, LogoutResponse,
    NextTournamentResponse, OpenTournamentsResponse, RegistrationInfo,
    SetNextTournamentResponse, SubmitRegistrationResponse, TournamentInfo, TournamentRequest,
    UpdateTournamentResponse, VerifyCertificateResponse,
};
