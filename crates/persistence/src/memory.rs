// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Process-local in-memory backend.
//!
//! Used when no database path is configured or the durable backend fails
//! to initialize. Nothing survives a restart. Identifier allocation,
//! record shapes, orderings, and error cases mirror the `SQLite` backend
//! so callers cannot tell the two apart within one process lifetime.

use std::collections::BTreeMap;

use shatranj_domain::{CertificateId, Registration, RegistrationDraft, Tournament, TournamentDraft};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// In-memory registration store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tournaments: BTreeMap<i64, Tournament>,
    registrations: BTreeMap<i64, Registration>,
    last_tournament_id: i64,
    last_registration_id: i64,
    next_tournament_pointer: Option<i64>,
}

impl MemoryStore {
    pub(crate) fn create_tournament(&mut self, draft: &TournamentDraft, stamp: &str) -> i64 {
        self.last_tournament_id += 1;
        let tournament_id: i64 = self.last_tournament_id;
        let tournament = Tournament {
            tournament_id,
            name: draft.name.clone(),
            date: draft.date.clone(),
            time: draft.time.clone(),
            is_open: draft.is_open,
            venue_address: draft.venue_address.clone(),
            venue_info: draft.venue_info.clone(),
            registration_fee: draft.registration_fee.clone(),
            created_at: stamp.to_string(),
            updated_at: stamp.to_string(),
        };
        self.tournaments.insert(tournament_id, tournament);
        info!("Created tournament ID: {} in memory", tournament_id);
        tournament_id
    }

    pub(crate) fn update_tournament(
        &mut self,
        tournament_id: i64,
        draft: &TournamentDraft,
        stamp: &str,
    ) -> Result<(), PersistenceError> {
        match self.tournaments.get_mut(&tournament_id) {
            Some(tournament) => {
                tournament.name = draft.name.clone();
                tournament.date = draft.date.clone();
                tournament.time = draft.time.clone();
                tournament.is_open = draft.is_open;
                tournament.venue_address = draft.venue_address.clone();
                tournament.venue_info = draft.venue_info.clone();
                tournament.registration_fee = draft.registration_fee.clone();
                tournament.updated_at = stamp.to_string();
                Ok(())
            }
            None => Err(PersistenceError::NotFound(format!(
                "Tournament with ID {tournament_id} not found"
            ))),
        }
    }

    /// Removes a tournament along with its registrations and, when it is
    /// the target of the next-tournament pointer, clears the pointer.
    pub(crate) fn delete_tournament(&mut self, tournament_id: i64) -> Result<(), PersistenceError> {
        if !self.tournaments.contains_key(&tournament_id) {
            return Err(PersistenceError::NotFound(format!(
                "Tournament with ID {tournament_id} not found"
            )));
        }

        let before: usize = self.registrations.len();
        self.registrations
            .retain(|_, registration| registration.tournament_id != tournament_id);
        debug!(
            "Removed {} registrations for tournament ID: {}",
            before - self.registrations.len(),
            tournament_id
        );

        self.tournaments.remove(&tournament_id);
        if self.next_tournament_pointer == Some(tournament_id) {
            self.next_tournament_pointer = None;
            debug!(
                "Cleared next tournament pointer for deleted tournament ID: {}",
                tournament_id
            );
        }
        info!("Deleted tournament ID: {} from memory", tournament_id);
        Ok(())
    }

    pub(crate) fn get_tournament(&self, tournament_id: i64) -> Option<Tournament> {
        self.tournaments.get(&tournament_id).cloned()
    }

    pub(crate) fn get_open_tournaments(&self) -> Vec<Tournament> {
        let mut open: Vec<Tournament> = self
            .tournaments
            .values()
            .filter(|tournament| tournament.is_open)
            .cloned()
            .collect();
        open.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.tournament_id.cmp(&b.tournament_id))
        });
        open
    }

    pub(crate) fn get_all_tournaments(&self, from_date: Option<&str>) -> Vec<Tournament> {
        let mut all: Vec<Tournament> = self
            .tournaments
            .values()
            .filter(|tournament| from_date.is_none_or(|from| tournament.date.as_str() >= from))
            .cloned()
            .collect();
        all.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.tournament_id.cmp(&a.tournament_id))
        });
        all
    }

    pub(crate) const fn get_next_tournament_id(&self) -> Option<i64> {
        self.next_tournament_pointer
    }

    pub(crate) fn set_next_tournament(&mut self, tournament_id: i64) {
        info!("Setting next tournament pointer to ID: {}", tournament_id);
        self.next_tournament_pointer = Some(tournament_id);
    }

    pub(crate) fn insert_registration(
        &mut self,
        draft: &RegistrationDraft,
        certificate_id: &CertificateId,
        stamp: &str,
    ) -> Result<i64, PersistenceError> {
        if self.certificate_id_exists(certificate_id.value()) {
            return Err(PersistenceError::DuplicateKey(format!(
                "Certificate ID {certificate_id} is already assigned"
            )));
        }

        self.last_registration_id += 1;
        let registration_id: i64 = self.last_registration_id;
        let registration = Registration {
            registration_id,
            tournament_id: draft.tournament_id,
            name: draft.name.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            year_of_birth: draft.year_of_birth,
            description: draft.description.clone(),
            agreed_tos: draft.agreed_tos,
            receipt_path: draft.receipt_path.clone(),
            certificate_id: certificate_id.clone(),
            certificate_confirmed: false,
            created_at: stamp.to_string(),
        };
        self.registrations.insert(registration_id, registration);
        info!("Created registration ID: {} in memory", registration_id);
        Ok(registration_id)
    }

    pub(crate) fn get_registration(&self, registration_id: i64) -> Option<Registration> {
        self.registrations.get(&registration_id).cloned()
    }

    pub(crate) fn get_registration_by_certificate(
        &self,
        certificate_value: &str,
    ) -> Option<Registration> {
        self.registrations
            .values()
            .find(|registration| registration.certificate_id.value() == certificate_value)
            .cloned()
    }

    pub(crate) fn certificate_id_exists(&self, certificate_value: &str) -> bool {
        self.registrations
            .values()
            .any(|registration| registration.certificate_id.value() == certificate_value)
    }

    pub(crate) fn confirm_certificate(
        &mut self,
        registration_id: i64,
    ) -> Result<(), PersistenceError> {
        match self.registrations.get_mut(&registration_id) {
            Some(registration) => {
                registration.certificate_confirmed = true;
                Ok(())
            }
            None => Err(PersistenceError::NotFound(format!(
                "Registration with ID {registration_id} not found"
            ))),
        }
    }

    pub(crate) fn get_registrations(&self, tournament_id: Option<i64>) -> Vec<Registration> {
        let mut matching: Vec<Registration> = self
            .registrations
            .values()
            .filter(|registration| {
                tournament_id.is_none_or(|id| registration.tournament_id == id)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.registration_id.cmp(&a.registration_id))
        });
        matching
    }
}
