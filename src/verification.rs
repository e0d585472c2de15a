//! Short-lived contact verification codes.
//!
//! One pending code per contact. A code is consumed on successful
//! verification or discovered expiry; a wrong guess leaves it in place.
//! The store itself is plain data; callers share it as
//! `Arc<Mutex<VerificationStore>>` so every operation is atomic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::{VERIFICATION_CODE_LENGTH, VERIFICATION_CODE_TTL_SECS};

#[derive(Debug, Clone)]
struct VerificationEntry {
    code: String,
    expires_at: Instant,
    patient_id: Option<String>,
}

/// Result of checking a submitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    NotFound,
    Expired,
    Mismatch,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Verified => "Verification successful",
            Self::NotFound => "No verification code found",
            Self::Expired => "Verification code expired",
            Self::Mismatch => "Invalid verification code",
        }
    }
}

/// Pending codes keyed by contact (email address or phone number).
#[derive(Debug)]
pub struct VerificationStore {
    entries: HashMap<String, VerificationEntry>,
    ttl: Duration,
}

impl VerificationStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(VERIFICATION_CODE_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Issue a fresh code for `contact`, replacing any pending one.
    pub fn send(&mut self, contact: &str, patient_id: Option<String>) -> String {
        let code = generate_code();
        self.entries.insert(
            contact.to_string(),
            VerificationEntry {
                code: code.clone(),
                expires_at: Instant::now() + self.ttl,
                patient_id,
            },
        );
        code
    }

    /// Issue a replacement code. Resends carry no patient id.
    pub fn resend(&mut self, contact: &str) -> String {
        self.send(contact, None)
    }

    pub fn verify(&mut self, contact: &str, code: &str) -> VerifyOutcome {
        let Some(entry) = self.entries.get(contact) else {
            return VerifyOutcome::NotFound;
        };

        if Instant::now() > entry.expires_at {
            self.entries.remove(contact);
            return VerifyOutcome::Expired;
        }

        if entry.code != code {
            return VerifyOutcome::Mismatch;
        }

        let patient_id = self.entries.remove(contact).and_then(|e| e.patient_id);
        tracing::info!(patient_id = ?patient_id, "Contact verified");
        VerifyOutcome::Verified
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| now <= e.expires_at);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VerificationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniformly random decimal code; leading zeros are kept.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..VERIFICATION_CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Handle for the background sweeper task.
pub struct SweeperHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for the task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}

/// Periodically purge expired codes until shut down.
pub fn spawn_sweeper(store: Arc<Mutex<VerificationStore>>, interval: Duration) -> SweeperHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        tracing::info!(?interval, "Verification sweeper started");
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    let purged = match store.lock() {
                        Ok(mut store) => store.purge_expired(),
                        Err(_) => {
                            tracing::error!("Verification store lock poisoned, stopping sweeper");
                            break;
                        }
                    };
                    if purged > 0 {
                        tracing::debug!(purged, "Purged expired verification codes");
                    }
                }
            }
        }

        tracing::info!("Verification sweeper stopped");
    });

    SweeperHandle {
        shutdown_tx: Some(shutdown_tx),
        task,
    }
}
