use std::collections::HashSet;

use super::config::{Coefficients, EventConfig, EventKind, MetricConfig};

/// Validate the points table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_events(events: &[EventConfig]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, event) in events.iter().enumerate() {
        let path = format!("events[{}]", i);

        if event.name.trim().is_empty() {
            errors.push(format!("{}.name: must not be empty", path));
        } else if !seen.insert(event.name.as_str()) {
            errors.push(format!("{}.name: duplicate event '{}'", path, event.name));
        }

        let unit = event.calibrated_unit();
        let unit_ok = match event.kind {
            EventKind::Race => !unit.is_length(),
            EventKind::Throw | EventKind::Jump => unit.is_length(),
        };
        if !unit_ok {
            errors.push(format!(
                "{}.unit: {} events cannot be calibrated in {}",
                path,
                event.kind.as_str(),
                unit.symbol()
            ));
        }

        if event.male.is_none() && event.female.is_none() {
            errors.push(format!("{}: needs coefficients for at least one of male/female", path));
        }
        if let Some(ref c) = event.male {
            check_coefficients(&format!("{}.male", path), c, &mut errors);
        }
        if let Some(ref c) = event.female {
            check_coefficients(&format!("{}.female", path), c, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_coefficients(path: &str, c: &Coefficients, errors: &mut Vec<String>) {
    if !(c.a.is_finite() && c.a > 0.0) {
        errors.push(format!("{}.a: must be positive, got {}", path, c.a));
    }
    if !(c.b.is_finite() && c.b >= 0.0) {
        errors.push(format!("{}.b: must be non-negative, got {}", path, c.b));
    }
    if !(c.c.is_finite() && c.c > 0.0) {
        errors.push(format!("{}.c: must be positive, got {}", path, c.c));
    }
}

/// Validate recovery metrics at startup.
pub fn validate_metrics(metrics: &[MetricConfig]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, metric) in metrics.iter().enumerate() {
        let path = format!("metrics[{}]", i);

        if metric.name.trim().is_empty() {
            errors.push(format!("{}.name: must not be empty", path));
        }
        for key in std::iter::once(&metric.name).chain(&metric.aliases) {
            if !key.trim().is_empty() && !seen.insert(key.as_str()) {
                errors.push(format!("{}: key '{}' is used by more than one metric", path, key));
            }
        }

        if !(metric.weight.is_finite() && metric.weight >= 0.0) {
            errors.push(format!("{}.weight: must be non-negative, got {}", path, metric.weight));
        }
        if !(metric.steepness.is_finite() && metric.steepness > 0.0) {
            errors.push(format!("{}.steepness: must be positive, got {}", path, metric.steepness));
        }
        if !(metric.lower_midpoint.is_finite() && metric.upper_midpoint.is_finite()) {
            errors.push(format!("{}: midpoints must be finite", path));
        } else if metric.lower_midpoint > metric.upper_midpoint {
            errors.push(format!(
                "{}.lower_midpoint: must not exceed upper_midpoint ({} > {})",
                path, metric.lower_midpoint, metric.upper_midpoint
            ));
        }
        if !(0.0 <= metric.floor && metric.floor < metric.ceil && metric.ceil <= 1.0) {
            errors.push(format!(
                "{}: need 0 <= floor < ceil <= 1, got floor {} and ceil {}",
                path, metric.floor, metric.ceil
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::config::{default_events, default_metrics, Direction, Unit};

    fn race(name: &str) -> EventConfig {
        EventConfig {
            name: name.to_string(),
            kind: EventKind::Race,
            unit: None,
            male: Some(Coefficients::new(25.4347, 18.0, 1.81)),
            female: None,
        }
    }

    fn metric(name: &str) -> MetricConfig {
        MetricConfig {
            name: name.to_string(),
            aliases: vec![],
            weight: 1.0,
            direction: Direction::High,
            lower_midpoint: 5.0,
            upper_midpoint: 8.5,
            steepness: 1.0,
            floor: 0.0,
            ceil: 1.0,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_events(&default_events()).is_ok());
        assert!(validate_metrics(&default_metrics()).is_ok());
    }

    #[test]
    fn test_empty_tables_are_valid() {
        assert!(validate_events(&[]).is_ok());
        assert!(validate_metrics(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_event() {
        let errors = validate_events(&[race("100m"), race("100m")]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("events[1].name"));
    }

    #[test]
    fn test_event_without_coefficients() {
        let mut e = race("100m");
        e.male = None;
        let errors = validate_events(&[e]).unwrap_err();
        assert!(errors[0].contains("at least one"));
    }

    #[test]
    fn test_race_in_meters_rejected() {
        let mut e = race("100m");
        e.unit = Some(Unit::Meters);
        let errors = validate_events(&[e]).unwrap_err();
        assert!(errors[0].contains("events[0].unit"));
    }

    #[test]
    fn test_bad_coefficients_collected() {
        let mut e = race("100m");
        e.male = Some(Coefficients::new(-1.0, f64::NAN, 0.0));
        let errors = validate_events(&[e]).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("events[0].male.a"));
        assert!(errors[1].contains("events[0].male.b"));
        assert!(errors[2].contains("events[0].male.c"));
    }

    #[test]
    fn test_alias_clash() {
        let mut a = metric("sleep_duration");
        a.aliases = vec!["sleep".to_string()];
        let b = metric("sleep");
        let errors = validate_metrics(&[a, b]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("metrics[1]"));
    }

    #[test]
    fn test_bad_metric_shape() {
        let mut m = metric("sleep_duration");
        m.weight = -0.5;
        m.steepness = 0.0;
        m.lower_midpoint = 9.0;
        m.ceil = 1.5;
        let errors = validate_metrics(&[m]).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_zero_weight_allowed() {
        let mut m = metric("sleep_duration");
        m.weight = 0.0;
        assert!(validate_metrics(&[m]).is_ok());
    }
}
