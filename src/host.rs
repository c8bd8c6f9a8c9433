//! Host Interfaces
//!
//! Read-only collaborators supplied by the composition root. The core never
//! reaches into the host directly; the alert store, event bus and
//! interception hook stay behind these seams.

use crate::alert::types::ResolvedAlert;

/// Bulk read access to the host alert store.
///
/// The store cannot look up a single alert, so the flush cycle fetches
/// everything at most once per cycle and indexes the result by id.
pub trait AlertStore: Send + Sync {
    fn all_alerts(&self) -> Result<Vec<ResolvedAlert>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// The store was unavailable or the read failed partway
    Unavailable { message: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable { message } => {
                write!(f, "Alert store unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for StoreError {}
