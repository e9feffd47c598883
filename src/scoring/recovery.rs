use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::{default_metrics, Direction, MetricConfig};
use super::curves::{round_to, Logistic};

/// Daily readings keyed by metric name. `None` means the test was not taken.
pub type Measurements = BTreeMap<String, Option<f64>>;

/// Read-only lookup of recovery metrics, by name and by alias.
#[derive(Debug, Clone)]
pub struct MetricTable {
    metrics: Vec<MetricConfig>,
    index: HashMap<String, usize>,
}

impl MetricTable {
    pub fn from_configs(configs: &[MetricConfig]) -> Self {
        let mut metrics: Vec<MetricConfig> = Vec::with_capacity(configs.len());
        let mut index = HashMap::new();
        for config in configs {
            let slot = match index.get(&config.name) {
                Some(&i) => {
                    metrics[i] = config.clone();
                    i
                }
                None => {
                    metrics.push(config.clone());
                    metrics.len() - 1
                }
            };
            index.insert(config.name.clone(), slot);
            for alias in &config.aliases {
                index.insert(alias.clone(), slot);
            }
        }
        MetricTable { metrics, index }
    }

    pub fn get(&self, name: &str) -> Option<&MetricConfig> {
        self.index.get(name).map(|&i| &self.metrics[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricConfig> {
        self.metrics.iter()
    }
}

impl Default for MetricTable {
    fn default() -> Self {
        MetricTable::from_configs(&default_metrics())
    }
}

impl MetricConfig {
    fn curve(&self) -> Logistic {
        Logistic::between(
            self.lower_midpoint,
            self.upper_midpoint,
            self.steepness,
            self.floor,
            self.ceil,
        )
    }

    /// Reading mapped onto `[floor, ceil]`, flipped for `low` metrics.
    pub fn normalize(&self, value: f64) -> f64 {
        let raw = self.curve().apply(value);
        match self.direction {
            Direction::High => raw,
            Direction::Low => 1.0 - raw,
        }
    }
}

/// Weighted contribution of one reading as `(normalized * weight, weight)`.
///
/// Unknown metrics contribute `(0, 0)` and so drop out of the average.
pub fn normalize_metric(table: &MetricTable, value: f64, metric: &str) -> (f64, f64) {
    match table.get(metric) {
        Some(config) => (config.normalize(value) * config.weight, config.weight),
        None => {
            warn!(metric, "no recovery configuration for metric, ignoring it");
            (0.0, 0.0)
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricContribution {
    /// Canonical metric name
    pub metric: String,
    pub value: f64,
    /// Curve output before weighting
    pub normalized: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecoveryScore {
    /// Weighted mean on a 0-10 scale, two decimals
    pub score: f64,
    pub contributions: Vec<MetricContribution>,
    /// Keys supplied with a value but not in the metric table
    pub ignored: Vec<String>,
}

/// Combine a day's readings into a recovery index with its breakdown.
///
/// Each metric counts once. When a reading arrives under both the metric's
/// name and one of its aliases, the name wins.
pub fn evaluate_recovery(table: &MetricTable, measurements: &Measurements) -> RecoveryScore {
    let mut chosen: BTreeMap<&str, (&MetricConfig, f64)> = BTreeMap::new();
    let mut ignored = Vec::new();

    for (name, value) in measurements {
        let Some(value) = *value else { continue };
        if !value.is_finite() {
            warn!(metric = %name, value, "skipping non-finite reading");
            continue;
        }

        let Some(config) = table.get(name) else {
            warn!(metric = %name, "no recovery configuration for metric, ignoring it");
            ignored.push(name.clone());
            continue;
        };

        match chosen.entry(config.name.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert((config, value));
            }
            Entry::Occupied(mut slot) => {
                warn!(
                    metric = %config.name,
                    key = %name,
                    "reading supplied under more than one name, counting it once"
                );
                if *name == config.name {
                    slot.insert((config, value));
                }
            }
        }
    }

    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    let contributions: Vec<MetricContribution> = chosen
        .into_values()
        .map(|(config, value)| {
            let normalized = config.normalize(value);
            weighted_sum += normalized * config.weight;
            weight_sum += config.weight;
            MetricContribution {
                metric: config.name.clone(),
                value,
                normalized,
                weight: config.weight,
            }
        })
        .collect();

    let score = if weight_sum == 0.0 {
        0.0
    } else {
        round_to(10.0 * weighted_sum / weight_sum, 2)
    };

    RecoveryScore {
        score,
        contributions,
        ignored,
    }
}

/// Recovery index in `[0, 10]`; `0.0` when nothing usable was supplied.
pub fn score_recovery(table: &MetricTable, measurements: &Measurements) -> f64 {
    evaluate_recovery(table, measurements).score
}

/// The optional wellness tests of a daily health check.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct HealthCheck {
    #[serde(default)]
    pub sleep_duration: Option<f64>,
    #[serde(default)]
    pub sleep_quality: Option<f64>,
    #[serde(default)]
    pub resting_heart_rate: Option<f64>,
    #[serde(default)]
    pub hand_grip_test: Option<f64>,
    #[serde(default)]
    pub longest_expiration_test: Option<f64>,
    #[serde(default)]
    pub single_leg_proprio_test: Option<f64>,
}

impl HealthCheck {
    pub fn measurements(&self) -> Measurements {
        [
            ("sleep_duration", self.sleep_duration),
            ("sleep_quality", self.sleep_quality),
            ("resting_heart_rate", self.resting_heart_rate),
            ("hand_grip_test", self.hand_grip_test),
            ("longest_expiration_test", self.longest_expiration_test),
            ("single_leg_proprio_test", self.single_leg_proprio_test),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
    }
}
