use serde::{Deserialize, Serialize};

/// Scoring family of an event. Decides the sign of the margin and the unit
/// marks are entered in.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Throw,
    Jump,
    Race,
}

impl EventKind {
    /// Unit a raw mark for this kind is supplied in.
    pub fn input_unit(self) -> Unit {
        match self {
            EventKind::Throw | EventKind::Jump => Unit::Centimeters,
            EventKind::Race => Unit::Seconds,
        }
    }

    /// Unit the points curve is calibrated in when an entry does not say.
    pub fn default_unit(self) -> Unit {
        match self {
            EventKind::Throw => Unit::Meters,
            EventKind::Jump => Unit::Centimeters,
            EventKind::Race => Unit::Seconds,
        }
    }

    /// Races are won by the smaller mark.
    pub fn lower_is_better(self) -> bool {
        matches!(self, EventKind::Race)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Throw => "throw",
            EventKind::Jump => "jump",
            EventKind::Race => "race",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Centimeters,
    Meters,
    Seconds,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Centimeters => "cm",
            Unit::Meters => "m",
            Unit::Seconds => "s",
        }
    }

    pub fn is_length(self) -> bool {
        matches!(self, Unit::Centimeters | Unit::Meters)
    }

    /// Convert `value` from `self` into `target`. `None` when the units measure
    /// different quantities.
    pub fn convert(self, value: f64, target: Unit) -> Option<f64> {
        match (self, target) {
            (from, to) if from == to => Some(value),
            (Unit::Centimeters, Unit::Meters) => Some(value / 100.0),
            (Unit::Meters, Unit::Centimeters) => Some(value * 100.0),
            _ => None,
        }
    }
}

/// Coefficients of `a * margin^c`, where the margin is measured from `b`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Coefficients {
    /// Scale multiplier
    pub a: f64,
    /// Baseline mark, worth exactly zero points
    pub b: f64,
    /// Curve exponent
    pub c: f64,
}

impl Coefficients {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Coefficients { a, b, c }
    }
}

/// One event of the points table.
///
/// Example YAML:
/// ```yaml
/// events:
///   - name: "Poids"
///     kind: throw
///     unit: meters
///     male: { a: 51.39, b: 1.5, c: 1.05 }
///     female: { a: 56.0211, b: 1.5, c: 1.05 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EventConfig {
    pub name: String,

    pub kind: EventKind,

    /// Unit the coefficients are calibrated in (default: derived from kind)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub male: Option<Coefficients>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female: Option<Coefficients>,
}

impl EventConfig {
    pub fn calibrated_unit(&self) -> Unit {
        self.unit.unwrap_or_else(|| self.kind.default_unit())
    }
}

/// Whether a higher or a lower reading is the healthier one.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    High,
    Low,
}

fn default_ceil() -> f64 {
    1.0
}

/// One wellness metric of the recovery index.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    pub name: String,

    /// Other keys the same reading may arrive under
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    pub weight: f64,

    pub direction: Direction,

    pub lower_midpoint: f64,

    pub upper_midpoint: f64,

    pub steepness: f64,

    #[serde(default)]
    pub floor: f64,

    #[serde(default = "default_ceil")]
    pub ceil: f64,
}

fn event(name: &str, kind: EventKind, male: Option<Coefficients>, female: Option<Coefficients>) -> EventConfig {
    EventConfig {
        name: name.to_string(),
        kind,
        unit: Some(kind.default_unit()),
        male,
        female,
    }
}

/// Built-in points table.
pub fn default_events() -> Vec<EventConfig> {
    use EventKind::{Jump, Race, Throw};
    let c = Coefficients::new;

    vec![
        event("60m", Race, Some(c(58.0150, 11.50, 1.81)), Some(c(46.0849, 13.0, 1.81))),
        event("100m", Race, Some(c(25.4347, 18.00, 1.81)), Some(c(17.8570, 21.0, 1.81))),
        event("200m", Race, None, Some(c(4.99087, 42.50, 1.81))),
        event("400m", Race, Some(c(1.53775, 82.00, 1.81)), Some(c(1.34285, 91.7, 1.81))),
        event("800m", Race, None, Some(c(0.11193, 254.00, 1.88))),
        event("1000m", Race, Some(c(0.08713, 305.50, 1.85)), Some(c(0.07068, 337.0, 1.88))),
        event("1500m", Race, Some(c(0.03768, 480.00, 1.85)), Some(c(0.02883, 535.0, 1.88))),
        event("60mH", Race, Some(c(20.5173, 15.50, 1.92)), Some(c(20.0479, 17.00, 1.835))),
        event("100mH", Race, None, Some(c(9.23076, 26.70, 1.835))),
        event("110mH", Race, Some(c(5.74352, 28.50, 1.92)), None),
        event("Longueur", Jump, Some(c(0.14354, 220.00, 1.40)), Some(c(0.188807, 210.00, 1.41))),
        event("Hauteur", Jump, Some(c(0.8465, 75.00, 1.42)), Some(c(1.84523, 75.00, 1.348))),
        event("Perche", Jump, Some(c(0.2797, 100.00, 1.35)), Some(c(0.44125, 100.0, 1.35))),
        event("Poids", Throw, Some(c(51.39, 1.50, 1.05)), Some(c(56.0211, 1.50, 1.05))),
        event("Disque", Throw, Some(c(12.91, 4.00, 1.10)), Some(c(12.3311, 3.00, 1.10))),
        event("Javelot", Throw, Some(c(10.14, 7.00, 1.08)), Some(c(15.9803, 3.80, 1.04))),
    ]
}

fn metric(
    name: &str,
    aliases: &[&str],
    weight: f64,
    direction: Direction,
    lower_midpoint: f64,
    upper_midpoint: f64,
    steepness: f64,
) -> MetricConfig {
    MetricConfig {
        name: name.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        weight,
        direction,
        lower_midpoint,
        upper_midpoint,
        steepness,
        floor: 0.0,
        ceil: 1.0,
    }
}

/// Built-in recovery metrics.
pub fn default_metrics() -> Vec<MetricConfig> {
    use Direction::{High, Low};

    vec![
        metric("sleep_duration", &[], 1.0, High, 5.0, 8.5, 1.0),
        metric("sleep_quality", &[], 0.9, High, 4.0, 10.0, 1.0),
        metric("resting_heart_rate", &[], 0.9, Low, 40.0, 70.0, 0.5),
        metric("hand_grip_test", &[], 0.8, High, 40.0, 70.0, 0.5),
        metric("longest_expiration_test", &[], 0.8, High, 30.0, 60.0, 0.3),
        metric("single_leg_proprio_test", &["one_leg_proprio_test"], 0.8, High, 45.0, 120.0, 0.1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_events_cover_both_tables() {
        let events = default_events();
        let male = events.iter().filter(|e| e.male.is_some()).count();
        let female = events.iter().filter(|e| e.female.is_some()).count();
        assert_eq!(male, 13);
        assert_eq!(female, 15);
    }

    #[test]
    fn test_throws_are_calibrated_in_meters() {
        for e in default_events() {
            match e.kind {
                EventKind::Throw => assert_eq!(e.calibrated_unit(), Unit::Meters),
                EventKind::Jump => assert_eq!(e.calibrated_unit(), Unit::Centimeters),
                EventKind::Race => assert_eq!(e.calibrated_unit(), Unit::Seconds),
            }
        }
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(Unit::Centimeters.convert(1650.0, Unit::Meters), Some(16.5));
        assert_eq!(Unit::Meters.convert(2.5, Unit::Centimeters), Some(250.0));
        assert_eq!(Unit::Seconds.convert(11.2, Unit::Seconds), Some(11.2));
        assert_eq!(Unit::Seconds.convert(11.2, Unit::Meters), None);
    }

    #[test]
    fn test_missing_unit_defaults_from_kind() {
        let yaml = r#"
name: "Poids"
kind: throw
male: { a: 51.39, b: 1.5, c: 1.05 }
"#;
        let parsed: EventConfig = serde_saphyr::from_str(yaml).unwrap();
        assert!(parsed.unit.is_none());
        assert_eq!(parsed.calibrated_unit(), Unit::Meters);
        assert!(parsed.female.is_none());
    }

    #[test]
    fn test_metric_floor_and_ceil_defaults() {
        let yaml = r#"
name: resting_heart_rate
weight: 0.9
direction: low
lower_midpoint: 40
upper_midpoint: 70
steepness: 0.5
"#;
        let parsed: MetricConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(parsed.floor, 0.0);
        assert_eq!(parsed.ceil, 1.0);
        assert_eq!(parsed.direction, Direction::Low);
        assert!(parsed.aliases.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
name: "100m"
kind: race
male: { a: 1.0, b: 2.0, c: 3.0, d: 4.0 }
"#;
        let parsed: Result<EventConfig, _> = serde_saphyr::from_str(yaml);
        assert!(parsed.is_err());
    }
}
