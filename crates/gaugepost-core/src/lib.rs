//! gaugePost core: record model, family grouping, and the reconciler.
//!
//! This crate turns the flat list of configured measurements into registered
//! gauge families. It intentionally carries no transport or runtime
//! dependencies so the grouping logic can be tested without an HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `GaugePostError`/`Result` so a
//! misconfigured exporter fails with a message instead of a backtrace.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod reconcile;
pub mod record;

/// Shared result type.
pub use error::{GaugePostError, Result};
