//! Forwarder Pipeline
//!
//! The explicitly constructed pipeline object. Owns the deduplication state
//! and the background flush thread; the composition root wires
//! [`Forwarder::on_alert_event`] and [`Forwarder::on_exchange`] into the
//! host event bus and interception hook and drives `start()` / `stop()`.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;
use parking_lot::{Condvar, Mutex, RwLock};

use crate::alert::dedup::DedupQueue;
use crate::alert::flush::{self, FlushStats};
use crate::alert::types::AlertEvent;
use crate::config::ForwarderConfig;
use crate::constants::INDEX_PATH;
use crate::delivery::{DeliveryClient, DeliverySink};
use crate::host::AlertStore;
use crate::traffic::filter;
use crate::traffic::types::{CapturedExchange, TrafficEntry};

// ============================================================================
// FORWARDER
// ============================================================================

pub struct Forwarder {
    inner: Arc<Inner>,
    worker: Option<JoinHandle<()>>,
}

struct Inner {
    config: Arc<RwLock<ForwarderConfig>>,
    queue: DedupQueue,
    store: Arc<dyn AlertStore>,
    sink: Arc<dyn DeliverySink>,
    /// Serializes flush firings; the timer never overlaps itself or a
    /// manual flush. Delays accumulate instead.
    cycle: Mutex<()>,
    /// Stop flag with condvar so the timer thread wakes immediately.
    stopped: Mutex<bool>,
    stop_signal: Condvar,
}

impl Forwarder {
    pub fn new(
        config: Arc<RwLock<ForwarderConfig>>,
        store: Arc<dyn AlertStore>,
        sink: Arc<dyn DeliverySink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                queue: DedupQueue::new(),
                store,
                sink,
                cycle: Mutex::new(()),
                stopped: Mutex::new(false),
                stop_signal: Condvar::new(),
            }),
            worker: None,
        }
    }

    /// Convenience constructor wiring the blocking HTTP client from the
    /// current collector URL and timeout.
    pub fn with_default_client(
        config: Arc<RwLock<ForwarderConfig>>,
        store: Arc<dyn AlertStore>,
    ) -> Self {
        let sink = {
            let c = config.read();
            Arc::new(DeliveryClient::new(
                &c.collector_url,
                Duration::from_secs(c.request_timeout_secs),
            ))
        };
        Self::new(config, store, sink)
    }

    /// Start the background flush thread. Idempotent while running.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }
        *self.inner.stopped.lock() = false;
        let inner = Arc::clone(&self.inner);
        self.worker = Some(thread::spawn(move || inner.run_timer()));
        log::info!("Forwarder started");
    }

    /// Stop the flush thread and clear all queued work. In-flight or
    /// undelivered findings are dropped, not persisted.
    pub fn stop(&mut self) {
        {
            let mut stopped = self.inner.stopped.lock();
            *stopped = true;
        }
        self.inner.stop_signal.notify_all();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.inner.queue.clear();
        log::info!("Forwarder stopped; pending work cleared");
    }

    /// Consume one alert event from the host event bus.
    ///
    /// Runs on the shared dispatch thread: never panics, never returns an
    /// error. Events below the configured minimums, with malformed fields,
    /// or with an already-seen fingerprint are dropped.
    pub fn on_alert_event(&self, event: &AlertEvent) {
        let (min_risk, min_confidence) = {
            let config = self.inner.config.read();
            (config.minimum_risk, config.minimum_confidence)
        };

        let confidence = match event.confidence_level() {
            Some(level) => level,
            None => {
                log::debug!("Dropping alert event with unparsable confidence: {:?}", event.confidence);
                return;
            }
        };
        if confidence < min_confidence {
            return;
        }
        let risk = match event.risk_level() {
            Some(level) => level,
            None => {
                log::debug!("Dropping alert event with unparsable risk: {:?}", event.risk);
                return;
            }
        };
        if risk < min_risk {
            return;
        }

        if self.inner.queue.offer(event, Utc::now().timestamp_millis()) {
            log::debug!("Queued alert {} ({})", event.alert_id, event.name);
        }
    }

    /// Consume one captured exchange from the host interception hook.
    ///
    /// Capture continues regardless of delivery success; failures are
    /// logged and swallowed.
    pub fn on_exchange(&self, exchange: &CapturedExchange) {
        let only_in_scope = self.inner.config.read().only_in_scope;
        if only_in_scope && !exchange.in_scope {
            return;
        }
        if filter::should_skip(exchange.content_type.as_deref()) {
            return;
        }

        let entry = TrafficEntry::from_exchange(exchange, Utc::now().to_rfc3339());
        let document = match serde_json::to_value(&entry) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Could not serialize traffic entry: {}", e);
                return;
            }
        };
        if let Err(e) = self.inner.sink.post(INDEX_PATH, &document) {
            log::warn!("Traffic entry not delivered: {}", e);
        }
    }

    /// Run one flush cycle synchronously on the caller thread. Shares the
    /// no-overlap guarantee with the timer.
    pub fn flush_now(&self) -> FlushStats {
        self.inner.flush_cycle()
    }

    /// Alert ids currently awaiting the next flush.
    pub fn pending_len(&self) -> usize {
        self.inner.queue.pending_len()
    }
}

impl Drop for Forwarder {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
        }
    }
}

// ============================================================================
// TIMER THREAD
// ============================================================================

impl Inner {
    fn run_timer(&self) {
        let (initial, interval) = {
            let config = self.config.read();
            (config.initial_delay_secs, config.flush_interval_secs)
        };
        log::info!(
            "Flush loop started (initial delay {}s, interval {}s)",
            initial,
            interval
        );

        if self.sleep_interruptible(Duration::from_secs(initial)) {
            return;
        }
        loop {
            self.flush_cycle();
            let interval = self.config.read().flush_interval_secs;
            if self.sleep_interruptible(Duration::from_secs(interval)) {
                return;
            }
        }
    }

    /// Returns true when stop was signalled during the wait.
    fn sleep_interruptible(&self, duration: Duration) -> bool {
        let mut stopped = self.stopped.lock();
        if *stopped {
            return true;
        }
        self.stop_signal.wait_for(&mut stopped, duration);
        *stopped
    }

    fn flush_cycle(&self) -> FlushStats {
        let _firing = self.cycle.lock();

        let ttl = self.config.read().fingerprint_ttl_secs;
        if ttl > 0 {
            let cutoff = Utc::now().timestamp_millis() - (ttl as i64) * 1000;
            let evicted = self.queue.evict_older_than(cutoff);
            if evicted > 0 {
                log::debug!("Evicted {} fingerprints past retention", evicted);
            }
        }

        let config = self.config.read().clone();
        flush::run_cycle(&self.queue, self.store.as_ref(), self.sink.as_ref(), &config)
    }
}

// ============================================================================
// TESTS
// ============================================================================
