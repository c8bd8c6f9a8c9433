//! Traffic Pipeline
//!
//! Captured exchange flow: interception hook -> content-type filter ->
//! header/body normalization -> delivery.

pub mod filter;
pub mod headers;
pub mod types;
