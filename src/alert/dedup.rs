//! Alert Deduplicator & Pending Queue
//!
//! Fingerprint-keyed deduplication plus the FIFO of alert ids awaiting the
//! scheduled flush. Both live under one lock so the check-and-set on the
//! fingerprint map and the enqueue appear atomic to concurrent producers:
//! when two threads race on the same new fingerprint, exactly one wins.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::alert::types::AlertEvent;

// ============================================================================
// DEDUP QUEUE
// ============================================================================

pub struct DedupQueue {
    state: Mutex<DedupState>,
}

struct DedupState {
    /// Fingerprint -> first-seen epoch millis. The timestamp drives the
    /// retention eviction and has no effect on dedup correctness.
    fingerprints: HashMap<String, i64>,
    /// Alert ids awaiting resolution and forwarding, in arrival order.
    pending: VecDeque<i32>,
}

impl DedupQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DedupState {
                fingerprints: HashMap::new(),
                pending: VecDeque::new(),
            }),
        }
    }

    /// Record the event's fingerprint and enqueue its alert id.
    ///
    /// Returns `true` only for the first event carrying a given fingerprint.
    /// Events with an unparsable alert id are dropped without recording the
    /// fingerprint, so a later well-formed instance can still pass.
    pub fn offer(&self, event: &AlertEvent, now_millis: i64) -> bool {
        let alert_id = match event.parsed_alert_id() {
            Some(id) => id,
            None => {
                log::debug!("Dropping alert event with unparsable id: {:?}", event.alert_id);
                return false;
            }
        };
        let fingerprint = event.fingerprint();

        let mut state = self.state.lock();
        if state.fingerprints.contains_key(&fingerprint) {
            return false;
        }
        state.fingerprints.insert(fingerprint, now_millis);
        state.pending.push_back(alert_id);
        true
    }

    /// Remove and return every pending id in FIFO order. A drained id is
    /// never re-presented.
    pub fn drain(&self) -> Vec<i32> {
        self.state.lock().pending.drain(..).collect()
    }

    /// Drop fingerprints first seen strictly before the cutoff.
    /// Returns the number of evicted entries.
    pub fn evict_older_than(&self, cutoff_millis: i64) -> usize {
        let mut state = self.state.lock();
        let before = state.fingerprints.len();
        state.fingerprints.retain(|_, seen| *seen >= cutoff_millis);
        before - state.fingerprints.len()
    }

    /// Clear both the pending queue and the fingerprint cache (shutdown).
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.fingerprints.clear();
        state.pending.clear();
    }

    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn fingerprint_count(&self) -> usize {
        self.state.lock().fingerprints.len()
    }
}

impl Default for DedupQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
