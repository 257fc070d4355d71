//! Registration reconciler.
//!
//! Walks the configured records once, in sequence order, and materializes
//! one gauge-vector family per distinct (name, label-name set). The family
//! table is explicit owned state, not a process-global; only the registry
//! handle is shared with the scrape side.
//!
//! Runs to completion before the listener is bound. Nothing mutates the
//! registry afterwards, so scrapes need no locking against the reconciler.

use std::collections::HashMap;

use prometheus::{GaugeVec, Opts, Registry};

use crate::error::{GaugePostError, Result};
use crate::record::{family_key, MetricRecord};

struct Family {
    gauge: GaugeVec,
    /// Positional schema, fixed from the creating record's declaration order.
    label_names: Vec<String>,
    help: String,
}

/// Owns the family-key -> gauge family table for the process lifetime.
pub struct Reconciler {
    registry: Registry,
    families: HashMap<String, Family>,
    /// First family key seen per metric name, for conflict diagnostics.
    key_by_name: HashMap<String, String>,
}

impl Reconciler {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            families: HashMap::new(),
            key_by_name: HashMap::new(),
        }
    }

    /// Handle to the registry families are registered with.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Apply every record in sequence order.
    ///
    /// Order is only significant for tie-breaking: the first record of a
    /// family fixes its help text and label order, and a repeated
    /// label-value combination keeps the last value seen.
    pub fn reconcile(&mut self, records: &[MetricRecord]) -> Result<()> {
        for record in records {
            self.apply(record)?;
        }
        Ok(())
    }

    fn apply(&mut self, record: &MetricRecord) -> Result<()> {
        let key = family_key(&record.name, &record.labels);

        if !self.families.contains_key(&key) {
            self.create_family(record, key.clone())?;
        }
        let family = self
            .families
            .get(&key)
            .ok_or_else(|| GaugePostError::Internal(format!("family {} vanished after insert", record.name)))?;

        // Help is first-write-wins; a later differing help is kept out of the
        // exposition but flagged so the operator can fix the config.
        if !record.help.is_empty() && record.help != family.help {
            tracing::warn!(
                metric = %record.name,
                kept = %family.help,
                discarded = %record.help,
                "help text differs from the one that created this family; keeping the first"
            );
        }

        let mut values = Vec::with_capacity(family.label_names.len());
        for name in &family.label_names {
            let value = record.labels.get(name).ok_or_else(|| {
                GaugePostError::Internal(format!("label {name} missing from a record of {}", record.name))
            })?;
            values.push(value.as_str());
        }
        family
            .gauge
            .get_metric_with_label_values(&values)
            .map_err(|e| GaugePostError::Registry(format!("series lookup for {} failed: {e}", record.name)))?
            .set(record.value);
        Ok(())
    }

    fn create_family(&mut self, record: &MetricRecord, key: String) -> Result<()> {
        // A second family under an already-used name would be rejected by the
        // registry anyway (label dimensions must be consistent per name);
        // catching it here names both label sets instead of surfacing the
        // registry's generic duplicate error.
        if let Some(first_key) = self.key_by_name.get(&record.name) {
            let first_labels = self
                .families
                .get(first_key)
                .map(|f| f.label_names.join(", "))
                .unwrap_or_default();
            let new_labels: Vec<&str> = record.labels.keys().map(String::as_str).collect();
            return Err(GaugePostError::SchemaConflict(format!(
                "metric {} declared with conflicting label sets: [{}] vs [{}]",
                record.name,
                first_labels,
                new_labels.join(", ")
            )));
        }

        let label_names: Vec<String> = record.labels.keys().cloned().collect();
        // The exposition library rejects an empty help string; fall back to
        // the metric name rather than failing a help-less config.
        let help = if record.help.is_empty() {
            record.name.clone()
        } else {
            record.help.clone()
        };

        let name_refs: Vec<&str> = label_names.iter().map(String::as_str).collect();
        let gauge = GaugeVec::new(Opts::new(record.name.clone(), help.clone()), &name_refs)
            .map_err(|e| GaugePostError::InvalidMetric(format!("family {} rejected: {e}", record.name)))?;
        self.registry
            .register(Box::new(gauge.clone()))
            .map_err(|e| GaugePostError::Registry(format!("register {} failed: {e}", record.name)))?;

        self.key_by_name.insert(record.name.clone(), key.clone());
        self.families.insert(
            key,
            Family {
                gauge,
                label_names,
                help,
            },
        );
        Ok(())
    }
}
