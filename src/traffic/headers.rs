//! Header Normalizer
//!
//! The collector schema expects header names lower-cased with hyphens
//! replaced by underscores. Headers sharing a normalized key merge their
//! values with `;` in encounter order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Normalize a request or response header list into the collector mapping.
pub fn normalize_headers(headers: &[(String, String)]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (name, value) in headers {
        let key = name.to_lowercase().replace('-', "_");
        match map.entry(key) {
            Entry::Occupied(mut existing) => {
                let joined = format!("{};{}", existing.get(), value);
                existing.insert(joined);
            }
            Entry::Vacant(slot) => {
                slot.insert(value.clone());
            }
        }
    }
    map
}

// ============================================================================
// TESTS
// ============================================================================
