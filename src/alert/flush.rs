//! Scheduled Flush Cycle
//!
//! Drains the pending queue, resolves alerts against a single per-cycle
//! store fetch, formats findings and hands them to the delivery sink. A
//! failure on one alert never aborts the rest of the cycle; a store fetch
//! failure aborts the cycle only.

use std::collections::HashMap;

use crate::alert::dedup::DedupQueue;
use crate::alert::report;
use crate::alert::types::ResolvedAlert;
use crate::config::ForwarderConfig;
use crate::constants::FINDINGS_PATH;
use crate::delivery::DeliverySink;
use crate::host::AlertStore;

/// Counters for one flush cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlushStats {
    pub drained: usize,
    pub delivered: usize,
    pub skipped_missing: usize,
    pub skipped_out_of_scope: usize,
    pub failed: usize,
}

/// Run one cycle. An empty queue performs no store fetch and no delivery.
pub fn run_cycle(
    queue: &DedupQueue,
    store: &dyn AlertStore,
    sink: &dyn DeliverySink,
    config: &ForwarderConfig,
) -> FlushStats {
    let mut stats = FlushStats::default();

    let ids = queue.drain();
    stats.drained = ids.len();
    if ids.is_empty() {
        return stats;
    }

    // One bulk fetch per cycle; findings change between cycles, so the
    // index is never cached across cycles.
    let alerts: HashMap<i32, ResolvedAlert> = match store.all_alerts() {
        Ok(list) => list.into_iter().map(|alert| (alert.id, alert)).collect(),
        Err(e) => {
            log::error!(
                "Alert store fetch failed, dropping {} pending ids for this cycle: {}",
                ids.len(),
                e
            );
            stats.failed = ids.len();
            return stats;
        }
    };

    for id in ids {
        let alert = match alerts.get(&id) {
            Some(alert) => alert,
            None => {
                // deleted between enqueue and flush, expected race
                stats.skipped_missing += 1;
                continue;
            }
        };

        if config.only_in_scope && !alert.in_scope {
            stats.skipped_out_of_scope += 1;
            continue;
        }

        let finding = report::render(alert);
        let document = match serde_json::to_value(&finding) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Could not serialize finding '{}': {}", finding.title, e);
                stats.failed += 1;
                continue;
            }
        };

        match sink.post(FINDINGS_PATH, &document) {
            Ok(()) => {
                stats.delivered += 1;
                log::debug!("Forwarded finding '{}'", finding.title);
            }
            Err(e) => {
                // isolation: the failure was already logged by the sink
                log::warn!("Finding '{}' not delivered: {}", finding.title, e);
                stats.failed += 1;
            }
        }
    }

    log::info!(
        "Flush cycle: {} drained, {} delivered, {} missing, {} out of scope, {} failed",
        stats.drained,
        stats.delivered,
        stats.skipped_missing,
        stats.skipped_out_of_scope,
        stats.failed
    );
    stats
}

// ============================================================================
// TESTS
// ============================================================================
