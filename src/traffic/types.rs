//! Traffic Types
//!
//! Raw captured exchanges handed over by the host interception hook, and
//! the wire documents posted to the collector's index endpoint. Entries are
//! ephemeral: built and forwarded immediately, never stored.

use std::collections::HashMap;

use serde::Serialize;

use crate::traffic::headers::normalize_headers;

// ============================================================================
// CAPTURED EXCHANGE (input)
// ============================================================================

/// One observed request/response pair as delivered by the host. Bodies
/// arrive as raw bytes; decoding happens during entry assembly.
#[derive(Debug, Clone)]
pub struct CapturedExchange {
    pub method: String,
    pub endpoint: String,
    pub request_headers: Vec<(String, String)>,
    pub request_body: Vec<u8>,
    pub status_code: u16,
    pub response_headers: Vec<(String, String)>,
    pub response_body: Vec<u8>,
    /// Normalised response content-type, when present
    pub content_type: Option<String>,
    /// Round-trip time in milliseconds
    pub elapsed_ms: u64,
    /// Whether the originating request is in the configured scope
    pub in_scope: bool,
}

// ============================================================================
// TRAFFIC ENTRY (wire document)
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TrafficEntry {
    /// RFC 3339 instant of capture
    pub timestamp: String,
    pub request: RequestRecord,
    pub response: ResponseRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    pub method: String,
    pub endpoint: String,
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseRecord {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Round-trip time in seconds
    pub rtt: f64,
}

impl TrafficEntry {
    /// Assemble the wire document for one exchange. Bodies that are not
    /// valid UTF-8 are omitted rather than failing the entry.
    pub fn from_exchange(exchange: &CapturedExchange, timestamp: String) -> Self {
        TrafficEntry {
            timestamp,
            request: RequestRecord {
                method: exchange.method.clone(),
                endpoint: exchange.endpoint.clone(),
                headers: normalize_headers(&exchange.request_headers),
                body: decode_body(&exchange.request_body),
            },
            response: ResponseRecord {
                status_code: exchange.status_code,
                headers: normalize_headers(&exchange.response_headers),
                body: decode_body(&exchange.response_body),
                rtt: exchange.elapsed_ms as f64 / 1000.0,
            },
        }
    }
}

/// Best-effort text decoding; binary payloads yield `None`.
fn decode_body(bytes: &[u8]) -> Option<String> {
    String::from_utf8(bytes.to_vec()).ok()
}

// ============================================================================
// TESTS
// ============================================================================
