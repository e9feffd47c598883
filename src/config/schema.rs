use serde::{Deserialize, Serialize};

use crate::scoring::{
    default_events, default_metrics, EventConfig, EventTable, MetricConfig, MetricTable,
};

/// Config file contents. Each table that is present replaces the built-in one.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricConfig>>,
}

impl Config {
    /// Config spelling out every built-in table.
    pub fn with_defaults() -> Self {
        Config {
            events: Some(default_events()),
            metrics: Some(default_metrics()),
        }
    }

    pub fn effective_events(&self) -> Vec<EventConfig> {
        self.events.clone().unwrap_or_else(default_events)
    }

    pub fn effective_metrics(&self) -> Vec<MetricConfig> {
        self.metrics.clone().unwrap_or_else(default_metrics)
    }

    pub fn event_table(&self) -> EventTable {
        EventTable::from_configs(&self.effective_events())
    }

    pub fn metric_table(&self) -> MetricTable {
        MetricTable::from_configs(&self.effective_metrics())
    }
}
