//! Alert Types
//!
//! Core types for scanner alerts. No logic here beyond parsing and the
//! canonical risk/confidence label tables.

use serde::{Deserialize, Serialize};

// ============================================================================
// RISK
// ============================================================================

/// Risk level of a finding, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Risk {
    Info,
    Low,
    Medium,
    High,
}

impl Risk {
    /// Parse the numeric level carried by event-bus parameters.
    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            0 => Some(Risk::Info),
            1 => Some(Risk::Low),
            2 => Some(Risk::Medium),
            3 => Some(Risk::High),
            _ => None,
        }
    }

    pub fn level(&self) -> i32 {
        match self {
            Risk::Info => 0,
            Risk::Low => 1,
            Risk::Medium => 2,
            Risk::High => 3,
        }
    }

    /// Canonical label used in formatted reports.
    pub fn label(&self) -> &'static str {
        match self {
            Risk::Info => "Info",
            Risk::Low => "Low",
            Risk::Medium => "Medium",
            Risk::High => "High",
        }
    }
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// CONFIDENCE
// ============================================================================

/// Confidence level of a finding, ordered from least to most certain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    FalsePositive,
    Low,
    Medium,
    High,
    UserConfirmed,
}

impl Confidence {
    /// Parse the numeric level carried by event-bus parameters.
    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            0 => Some(Confidence::FalsePositive),
            1 => Some(Confidence::Low),
            2 => Some(Confidence::Medium),
            3 => Some(Confidence::High),
            4 => Some(Confidence::UserConfirmed),
            _ => None,
        }
    }

    pub fn level(&self) -> i32 {
        match self {
            Confidence::FalsePositive => 0,
            Confidence::Low => 1,
            Confidence::Medium => 2,
            Confidence::High => 3,
            Confidence::UserConfirmed => 4,
        }
    }

    /// Canonical label used in formatted reports.
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::FalsePositive => "False Positive",
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
            Confidence::UserConfirmed => "User-Confirmed",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// ALERT EVENT
// ============================================================================

/// Transient notification from the host event bus.
///
/// Field values arrive as raw strings; parsing failures drop the event
/// rather than raising to the shared dispatch thread.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub plugin_id: String,
    pub name: String,
    /// Numeric risk level as delivered by the bus
    pub risk: String,
    /// Numeric confidence level as delivered by the bus
    pub confidence: String,
    pub alert_id: String,
    /// Whether the underlying message is in the configured scope
    pub in_scope: bool,
}

impl AlertEvent {
    /// Deduplication identity: two alert instances with equal fingerprints
    /// are treated as the same finding.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.plugin_id, self.name, self.risk, self.confidence
        )
    }

    pub fn risk_level(&self) -> Option<Risk> {
        self.risk.trim().parse::<i32>().ok().and_then(Risk::from_level)
    }

    pub fn confidence_level(&self) -> Option<Confidence> {
        self.confidence
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(Confidence::from_level)
    }

    pub fn parsed_alert_id(&self) -> Option<i32> {
        self.alert_id.trim().parse().ok()
    }
}

// ============================================================================
// RESOLVED ALERT
// ============================================================================

/// Full alert record fetched from the host alert store, keyed by alert id.
///
/// Optional text fields use the empty string for "not present"; the report
/// formatter treats blank (empty or whitespace) fields as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAlert {
    pub id: i32,
    pub plugin_id: i32,
    pub name: String,
    pub uri: String,
    pub method: String,
    pub description: String,
    pub other_info: String,
    pub risk: Risk,
    pub confidence: Confidence,
    pub evidence: String,
    pub param: String,
    pub post_data: String,
    pub input_vector: String,
    pub attack: String,
    pub solution: String,
    pub cwe_id: i32,
    pub wasc_id: i32,
    pub reference: String,
    /// Whether the originating message is in the configured scope
    pub in_scope: bool,
}

impl ResolvedAlert {
    /// Minimal record with all optional fields blank.
    pub fn new(id: i32, plugin_id: i32, name: &str, uri: &str) -> Self {
        Self {
            id,
            plugin_id,
            name: name.to_string(),
            uri: uri.to_string(),
            method: String::new(),
            description: String::new(),
            other_info: String::new(),
            risk: Risk::Info,
            confidence: Confidence::Medium,
            evidence: String::new(),
            param: String::new(),
            post_data: String::new(),
            input_vector: String::new(),
            attack: String::new(),
            solution: String::new(),
            cwe_id: 0,
            wasc_id: 0,
            reference: String::new(),
            in_scope: true,
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
    fn risk_levels_round_trip() {
        for level in 0..4 {
            let risk = Risk::from_level(level).unwrap();
            assert_eq!(risk.level(), level);
        }
        assert!(Risk::from_level(-1).is_none());
        assert!(Risk::from_level(4).is_none());
    }

    #[test]
    fn confidence_levels_round_trip() {
        for level in 0..5 {
            let confidence = Confidence::from_level(level).unwrap();
            assert_eq!(confidence.level(), level);
        }
        assert!(Confidence::from_level(5).is_none());
    }

    #[test]
    fn ordering_follows_severity() {
        assert!(Risk::Info < Risk::Low);
        assert!(Risk::Medium < Risk::High);
        assert!(Confidence::FalsePositive < Confidence::Low);
        assert!(Confidence::High < Confidence::UserConfirmed);
    }

    #[test]
    fn labels_match_canonical_tables() {
        assert_eq!(Risk::Info.label(), "Info");
        assert_eq!(Risk::High.label(), "High");
        assert_eq!(Confidence::FalsePositive.label(), "False Positive");
        assert_eq!(Confidence::UserConfirmed.label(), "User-Confirmed");
    }

    #[test]
    fn fingerprint_joins_identity_fields() {
        let event = AlertEvent {
            plugin_id: "40012".into(),
            name: "XSS".into(),
            risk: "0".into(),
            confidence: "2".into(),
            alert_id: "7".into(),
            in_scope: true,
        };
        assert_eq!(event.fingerprint(), "40012/XSS/0/2");
    }

    #[test]
    fn malformed_event_fields_parse_to_none() {
        let event = AlertEvent {
            plugin_id: "1".into(),
            name: "n".into(),
            risk: "high".into(),
            confidence: "".into(),
            alert_id: "abc".into(),
            in_scope: true,
        };
        assert!(event.risk_level().is_none());
        assert!(event.confidence_level().is_none());
        assert!(event.parsed_alert_id().is_none());
    }
}
