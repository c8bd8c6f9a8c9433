//! Forwarder Configuration
//!
//! Owned by the host settings layer; the core only reads it. Defaults match
//! the documented configuration surface and can be overridden through the
//! environment helpers in `constants`.

use serde::{Deserialize, Serialize};

use crate::alert::types::{Confidence, Risk};
use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwarderConfig {
    /// Forward only events whose originating message is in scope
    pub only_in_scope: bool,
    /// Collector base URL
    pub collector_url: String,
    /// Events below this confidence are discarded
    pub minimum_confidence: Confidence,
    /// Events below this risk are discarded
    pub minimum_risk: Risk,
    /// Delay before the first flush (seconds)
    pub initial_delay_secs: u64,
    /// Fixed delay between flushes (seconds)
    pub flush_interval_secs: u64,
    /// Retention for processed fingerprints; 0 keeps them forever
    pub fingerprint_ttl_secs: u64,
    /// Collector request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            only_in_scope: true,
            collector_url: constants::get_collector_url(),
            minimum_confidence: Confidence::Medium,
            minimum_risk: Risk::Info,
            initial_delay_secs: constants::get_initial_delay(),
            flush_interval_secs: constants::get_flush_interval(),
            fingerprint_ttl_secs: constants::DEFAULT_FINGERPRINT_TTL,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_configuration_surface() {
        let config = ForwarderConfig::default();
        assert!(config.only_in_scope);
        assert_eq!(config.collector_url, "http://localhost:8000");
        assert_eq!(config.minimum_confidence, Confidence::Medium);
        assert_eq!(config.minimum_risk, Risk::Info);
        assert_eq!(config.initial_delay_secs, 60);
        assert_eq!(config.flush_interval_secs, 120);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ForwarderConfig {
            minimum_risk: Risk::High,
            minimum_confidence: Confidence::UserConfirmed,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ForwarderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.minimum_risk, Risk::High);
        assert_eq!(back.minimum_confidence, Confidence::UserConfirmed);
        assert_eq!(back.collector_url, config.collector_url);
    }
}
