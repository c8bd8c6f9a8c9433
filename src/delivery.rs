//! Delivery Client
//!
//! Blocking JSON POST delivery to the collector. One client instance is
//! shared by the traffic path (host dispatch threads) and the findings path
//! (flush thread); a slow collector therefore stalls the calling thread, an
//! accepted trade-off. Failures are logged with the offending URL and
//! surfaced as errors; callers continue regardless.

use std::time::Duration;

// ============================================================================
// SINK INTERFACE
// ============================================================================

/// Outbound delivery seam. Filtering and formatting never touch the
/// transport, so a queued or asynchronous strategy can replace the blocking
/// client without changes elsewhere.
pub trait DeliverySink: Send + Sync {
    /// POST a JSON document to `<collector base><path>`.
    fn post(&self, path: &str, document: &serde_json::Value) -> Result<(), DeliveryError>;
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum DeliveryError {
    /// Collector answered with an error status
    Status { url: String, code: u16 },
    /// Transport-level failure (connect, timeout, I/O)
    Transport { url: String, message: String },
    /// Document could not be serialized
    Serialize { message: String },
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::Status { url, code } => {
                write!(f, "Failed to POST {}: HTTP {}", url, code)
            }
            DeliveryError::Transport { url, message } => {
                write!(f, "Failed to POST {}: {}", url, message)
            }
            DeliveryError::Serialize { message } => {
                write!(f, "Failed to serialize document: {}", message)
            }
        }
    }
}

impl std::error::Error for DeliveryError {}

// ============================================================================
// CLIENT
// ============================================================================

pub struct DeliveryClient {
    base_url: String,
    agent: ureq::Agent,
}

impl DeliveryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl DeliverySink for DeliveryClient {
    fn post(&self, path: &str, document: &serde_json::Value) -> Result<(), DeliveryError> {
        let url = self.url_for(path);
        let body = serde_json::to_string(document).map_err(|e| DeliveryError::Serialize {
            message: e.to_string(),
        })?;

        match self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&body)
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => {
                log::error!("Failed to POST {}: HTTP {}", url, code);
                Err(DeliveryError::Status { url, code })
            }
            Err(e) => {
                log::error!("Failed to POST {}: {}", url, e);
                Err(DeliveryError::Transport {
                    url,
                    message: e.to_string(),
                })
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    /// Accept one connection, return the raw request, answer with `status`.
    fn one_shot_collector(status: u16) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text
                        .lines()
                        .find_map(|l| l.to_lowercase().strip_prefix("content-length:").map(str::trim).map(String::from))
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let reason = if status < 400 { "OK" } else { "ERR" };
            let response = format!("HTTP/1.1 {} {}\r\ncontent-length: 0\r\n\r\n", status, reason);
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(String::from_utf8_lossy(&buf).to_string()).unwrap();
        });

        (base, rx)
    }

    #[test]
    fn posts_json_with_content_type() {
        let (base, rx) = one_shot_collector(200);
        let client = DeliveryClient::new(&base, Duration::from_secs(5));
        let document = serde_json::json!({"target": "t", "title": "x"});

        client.post("/findings", &document).unwrap();

        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /findings HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.contains("\"target\":\"t\""));
    }

    #[test]
    fn error_status_is_reported_with_url() {
        let (base, _rx) = one_shot_collector(500);
        let client = DeliveryClient::new(&base, Duration::from_secs(5));

        let err = client.post("/index", &serde_json::json!({})).unwrap_err();
        match err {
            DeliveryError::Status { url, code } => {
                assert_eq!(code, 500);
                assert!(url.ends_with("/index"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn unreachable_collector_is_a_transport_error() {
        // reserved port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = DeliveryClient::new(&format!("http://{}", addr), Duration::from_millis(500));
        let err = client.post("/index", &serde_json::json!({})).unwrap_err();
        assert!(matches!(err, DeliveryError::Transport { .. }));
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let client = DeliveryClient::new("http://localhost:8000/", Duration::from_secs(1));
        assert_eq!(client.url_for("/findings"), "http://localhost:8000/findings");
    }
}
