//! Alert Pipeline
//!
//! Finding events flow: event bus -> dedup -> pending queue ->
//! scheduled flush -> report formatter -> delivery.

pub mod dedup;
pub mod flush;
pub mod report;
pub mod types;
