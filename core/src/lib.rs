//! SecureCheck core: a read-only dashboard over a police check-post log.
//!
//! Data flows one way: `store` materializes the `traffic_stops` table,
//! and `metrics`, `charts`, `catalog` and `predictor` each consume a fresh
//! snapshot. `dashboard` wires them to one call per user interaction.

pub mod catalog;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod predictor;
pub mod rng;
pub mod stop;
pub mod store;
pub mod synth;
pub mod table;
pub mod types;
