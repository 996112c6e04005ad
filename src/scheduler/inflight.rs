//! Process-wide guard against finalizing the same record twice at once.
//!
//! Recovery and a live enqueue can both produce a task for one record around a restart
//! boundary. Whichever payload claims the record first runs; the other is skipped. A claim
//! is released when its payload finishes, after which the record's `completed` flag stops
//! any later attempt. Nothing here coordinates separate processes.

use dashmap::DashSet;
use std::sync::Arc;

use crate::scheduler::task::TaskKind;

type ClaimKey = (TaskKind, i32);

#[derive(Clone, Default, Debug)]
pub struct InFlight {
    claims: Arc<DashSet<ClaimKey>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a record for finalization.
    ///
    /// # Returns
    /// - `Some(InFlightClaim)` - This caller owns the record until the claim is dropped
    /// - `None` - Another payload is finalizing the record right now
    pub fn claim(&self, kind: TaskKind, record_id: i32) -> Option<InFlightClaim> {
        let key = (kind, record_id);
        if !self.claims.insert(key) {
            return None;
        }

        Some(InFlightClaim {
            claims: self.claims.clone(),
            key,
        })
    }

    #[cfg(test)]
    pub fn is_claimed(&self, kind: TaskKind, record_id: i32) -> bool {
        self.claims.contains(&(kind, record_id))
    }
}

/// Ownership of one record; released on drop.
#[derive(Debug)]
pub struct InFlightClaim {
    claims: Arc<DashSet<ClaimKey>>,
    key: ClaimKey,
}

impl Drop for InFlightClaim {
    fn drop(&mut self) {
        self.claims.remove(&self.key);
    }
}
