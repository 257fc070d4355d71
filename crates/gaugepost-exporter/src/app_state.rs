//! Shared application state for the exporter.
//!
//! After reconciliation the registry is read-only; the handler only gathers.

use prometheus::Registry;

#[derive(Clone)]
pub struct AppState {
    registry: Registry,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
