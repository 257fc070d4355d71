//! gaugePost exporter library entry.
//!
//! This crate wires the config loader, reconciler, and scrape endpoint into
//! the exporter binary. It is intended to be consumed by `main.rs` and by
//! integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod listen;
pub mod router;
