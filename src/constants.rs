//! Central Configuration Constants
//!
//! Single source of truth for collector defaults.
//! To change the default collector endpoint, only edit this file.

/// Default collector base URL
pub const DEFAULT_COLLECTOR_URL: &str = "http://localhost:8000";

/// Collector path receiving captured traffic entries
pub const INDEX_PATH: &str = "/index";

/// Collector path receiving formatted findings
pub const FINDINGS_PATH: &str = "/findings";

/// Default delay before the first flush (seconds)
pub const DEFAULT_INITIAL_DELAY: u64 = 60;

/// Default fixed delay between flushes (seconds)
pub const DEFAULT_FLUSH_INTERVAL: u64 = 120;

/// Default retention for processed fingerprints (seconds); 0 keeps forever
pub const DEFAULT_FINGERPRINT_TTL: u64 = 86_400;

/// Default collector request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get collector base URL from environment or use default
pub fn get_collector_url() -> String {
    std::env::var("COLLECTOR_URL").unwrap_or_else(|_| DEFAULT_COLLECTOR_URL.to_string())
}

/// Get flush interval from environment or use default
pub fn get_flush_interval() -> u64 {
    std::env::var("COLLECTOR_FLUSH_INTERVAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FLUSH_INTERVAL)
}

/// Get initial flush delay from environment or use default
pub fn get_initial_delay() -> u64 {
    std::env::var("COLLECTOR_INITIAL_DELAY")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_INITIAL_DELAY)
}
