use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::config::{default_events, Coefficients, EventConfig, EventKind, Unit};
use super::curves::PowerLaw;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Accepts the stored codes `M`/`F` and the words `male`/`female`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Sex::Male),
            "f" | "female" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Why a mark could not be put on the points table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("unrecognised sex '{0}' (expected M or F)")]
    UnknownSex(String),

    #[error("event '{event}' has no calibration for sex {sex}")]
    NoCalibration { event: String, sex: Sex },

    #[error("event '{event}' is calibrated in {unit} which cannot take {kind} marks")]
    IncompatibleUnit {
        event: String,
        kind: &'static str,
        unit: &'static str,
    },

    #[error("performance {0} is negative, not finite, or off the points table")]
    InvalidPerformance(f64),
}

/// Read-only lookup of the points table.
#[derive(Debug, Clone)]
pub struct EventTable {
    events: Vec<EventConfig>,
    index: HashMap<String, usize>,
}

impl EventTable {
    /// Later entries replace earlier entries with the same name.
    pub fn from_configs(configs: &[EventConfig]) -> Self {
        let mut events: Vec<EventConfig> = Vec::with_capacity(configs.len());
        let mut index = HashMap::new();
        for config in configs {
            match index.get(&config.name) {
                Some(&i) => events[i] = config.clone(),
                None => {
                    index.insert(config.name.clone(), events.len());
                    events.push(config.clone());
                }
            }
        }
        EventTable { events, index }
    }

    pub fn get(&self, name: &str) -> Option<&EventConfig> {
        self.index.get(name).map(|&i| &self.events[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Events in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &EventConfig> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventTable {
    fn default() -> Self {
        EventTable::from_configs(&default_events())
    }
}

/// Full account of one scored mark.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventScore {
    pub event: String,
    pub sex: Sex,
    pub kind: EventKind,
    /// Mark as supplied (cm for jumps and throws, s for races)
    pub performance: f64,
    /// Mark in the unit the curve is calibrated in
    pub converted: f64,
    pub unit: Unit,
    pub coefficients: Coefficients,
    /// Distance past the baseline, positive when the mark scores
    pub margin: f64,
    pub points: u32,
}

/// Score a mark, reporting why when it cannot be scored.
///
/// A mark at or short of the baseline is a valid result worth 0 points, not
/// an error.
pub fn evaluate_event(
    table: &EventTable,
    event: &str,
    sex: &str,
    performance: f64,
) -> Result<EventScore, ScoringError> {
    let config = table
        .get(event)
        .ok_or_else(|| ScoringError::UnknownEvent(event.to_string()))?;
    let sex = Sex::parse(sex).ok_or_else(|| ScoringError::UnknownSex(sex.to_string()))?;
    let coefficients = match sex {
        Sex::Male => config.male,
        Sex::Female => config.female,
    }
    .ok_or_else(|| ScoringError::NoCalibration {
        event: config.name.clone(),
        sex,
    })?;

    if !performance.is_finite() || performance < 0.0 {
        return Err(ScoringError::InvalidPerformance(performance));
    }

    let unit = config.calibrated_unit();
    let converted = config
        .kind
        .input_unit()
        .convert(performance, unit)
        .ok_or(ScoringError::IncompatibleUnit {
            event: config.name.clone(),
            kind: config.kind.as_str(),
            unit: unit.symbol(),
        })?;

    let margin = if config.kind.lower_is_better() {
        coefficients.b - converted
    } else {
        converted - coefficients.b
    };

    let curve = PowerLaw {
        a: coefficients.a,
        c: coefficients.c,
    };
    // Truncate: a mark never rounds up into points it did not reach
    let raw = curve.apply(margin).floor();
    if !raw.is_finite() || raw > f64::from(u32::MAX) {
        return Err(ScoringError::InvalidPerformance(performance));
    }
    let points = raw as u32;

    Ok(EventScore {
        event: config.name.clone(),
        sex,
        kind: config.kind,
        performance,
        converted,
        unit,
        coefficients,
        margin,
        points,
    })
}

/// Points for a mark, or 0 for anything that cannot be scored.
pub fn score_event(table: &EventTable, event: &str, sex: &str, performance: f64) -> u32 {
    match evaluate_event(table, event, sex, performance) {
        Ok(score) => score.points,
        Err(e) => {
            debug!(event, sex, performance, "scored as 0: {}", e);
            0
        }
    }
}
