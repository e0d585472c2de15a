//! Transport-agnostic service state.
//!
//! `CoreState` is built once at startup and shared behind an `Arc` by
//! every request handler and the background sweeper.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::locator::FacilityDirectory;
use crate::triage::{ModelSet, TriageOrchestrator};
use crate::verification::VerificationStore;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Lock poisoned")]
    LockPoisoned,
}

pub struct CoreState {
    pub orchestrator: TriageOrchestrator,
    pub facilities: FacilityDirectory,
    /// Shared with the sweeper task, hence its own `Arc`.
    verification: Arc<Mutex<VerificationStore>>,
}

impl CoreState {
    pub fn new(models: ModelSet) -> Self {
        Self::with_parts(
            TriageOrchestrator::new(models),
            FacilityDirectory::default(),
            VerificationStore::new(),
        )
    }

    pub fn with_parts(
        orchestrator: TriageOrchestrator,
        facilities: FacilityDirectory,
        verification: VerificationStore,
    ) -> Self {
        Self {
            orchestrator,
            facilities,
            verification: Arc::new(Mutex::new(verification)),
        }
    }

    /// Exclusive access to the verification store for one operation.
    pub fn lock_verification(&self) -> Result<MutexGuard<'_, VerificationStore>, CoreError> {
        self.verification.lock().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn verification_handle(&self) -> Arc<Mutex<VerificationStore>> {
        Arc::clone(&self.verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::VerifyOutcome;

    #[test]
    fn new_state_has_no_models_and_default_directory() {
        let state = CoreState::new(ModelSet::unavailable());
        assert!(!state.orchestrator.models().emergency.is_loaded());
        assert_eq!(state.facilities.len(), 5);
        assert!(state.lock_verification().unwrap().is_empty());
    }

    #[test]
    fn handle_shares_the_same_store() {
        let state = CoreState::new(ModelSet::unavailable());
        let code = state.lock_verification().unwrap().send("a@x.com", None);

        let handle = state.verification_handle();
        let outcome = handle.lock().unwrap().verify("a@x.com", &code);
        assert_eq!(outcome, VerifyOutcome::Verified);
        assert!(state.lock_verification().unwrap().is_empty());
    }
}
