//! Audit trail subsystem.
//!
//! Handlers record (principal, event) pairs after authorization succeeds.
//! Recording is fire-and-forget from the caller's point of view, but a
//! failed append is reported at error level with full detail; the audit
//! trail is the system's only accountability record, so write failures
//! must never disappear silently. Entries are append-only and never
//! mutated or deleted here.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique log ID.
    pub log_id: Uuid,
    /// Acting principal.
    pub principal_id: String,
    /// Event identifier (e.g., "verify-user", "buy-product").
    pub event_id: String,
    /// Seconds since epoch at record time.
    pub timestamp: u64,
}

/// Append-only storage for audit entries.
pub trait AuditStore: Send + Sync {
    fn append(&self, entry: AuditLogEntry) -> Result<(), StoreUnavailable>;
}

/// The audit store could not accept the entry.
#[derive(Debug, thiserror::Error)]
#[error("audit store unavailable: {0}")]
pub struct StoreUnavailable(pub String);

/// In-memory append-only store.
#[derive(Default)]
pub struct MemoryAuditStore {
    entries: Mutex<Vec<AuditLogEntry>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries, oldest first.
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().expect("audit store mutex poisoned").clone()
    }
}

impl AuditStore for MemoryAuditStore {
    fn append(&self, entry: AuditLogEntry) -> Result<(), StoreUnavailable> {
        self.entries.lock().expect("audit store mutex poisoned").push(entry);
        Ok(())
    }
}

/// Records authorized actions against a backing store.
pub struct AuditLog<S: AuditStore> {
    store: S,
}

impl<S: AuditStore> AuditLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record an action for a principal. An empty principal ID is a
    /// no-op: anonymous/public actions are intentionally unattributed.
    pub fn record(&self, principal_id: &str, event_id: &str) {
        if principal_id.is_empty() {
            return;
        }

        let entry = AuditLogEntry {
            log_id: Uuid::new_v4(),
            principal_id: principal_id.to_string(),
            event_id: event_id.to_string(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        };

        match self.store.append(entry) {
            Ok(()) => {
                tracing::debug!(principal = %principal_id, event = %event_id, "Audit entry recorded");
            }
            Err(e) => {
                tracing::error!(
                    principal = %principal_id,
                    event = %event_id,
                    error = %e,
                    "Failed to record audit entry"
                );
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
