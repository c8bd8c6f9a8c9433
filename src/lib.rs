//! Security telemetry forwarder.
//!
//! Ingests two independent streams from a host traffic-inspection tool,
//! discrete finding (alert) events and captured request/response traffic,
//! and forwards a filtered, deduplicated, normalized subset of each to a
//! remote collector service as JSON documents.
//!
//! The composition root constructs a [`Forwarder`] from a
//! [`ForwarderConfig`], an [`AlertStore`] implementation and a delivery
//! sink, wires [`Forwarder::on_alert_event`] and [`Forwarder::on_exchange`]
//! into the host callbacks, and drives the lifecycle with
//! [`Forwarder::start`] / [`Forwarder::stop`].

pub mod alert;
pub mod config;
pub mod constants;
pub mod delivery;
pub mod forwarder;
pub mod host;
pub mod traffic;

pub use alert::report::Finding;
pub use alert::types::{AlertEvent, Confidence, ResolvedAlert, Risk};
pub use config::ForwarderConfig;
pub use delivery::{DeliveryClient, DeliveryError, DeliverySink};
pub use forwarder::Forwarder;
pub use host::{AlertStore, StoreError};
pub use traffic::types::{CapturedExchange, TrafficEntry};
