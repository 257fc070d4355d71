use serde::Deserialize;

use gaugepost_core::error::{GaugePostError, Result};
use gaugepost_core::record::MetricRecord;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    #[serde(default)]
    pub metrics: Vec<MetricRecord>,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        for (i, m) in self.metrics.iter().enumerate() {
            if m.name.is_empty() {
                return Err(GaugePostError::Config(format!(
                    "metrics[{i}]: name must not be empty"
                )));
            }
        }
        Ok(())
    }
}
