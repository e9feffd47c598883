use anyhow::{bail, Result};
use serde::Serialize;

use super::engine::{score_event, EventTable};
use super::tiers::{Tier, TierScale};

/// Standard multi-event competitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CombinedEvent {
    Decathlon,
    Heptathlon,
}

impl CombinedEvent {
    /// Events in competition order.
    pub fn events(self) -> &'static [&'static str] {
        match self {
            CombinedEvent::Decathlon => &[
                "100m", "Longueur", "Poids", "Hauteur", "400m", "110mH", "Disque", "Perche",
                "Javelot", "1500m",
            ],
            CombinedEvent::Heptathlon => {
                &["100mH", "Hauteur", "Poids", "200m", "Longueur", "Javelot", "800m"]
            }
        }
    }

    pub fn tier_scale(self) -> TierScale {
        match self {
            CombinedEvent::Decathlon => TierScale::Decathlon,
            CombinedEvent::Heptathlon => TierScale::Heptathlon,
        }
    }
}

/// One mark of a combined competition.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub event: String,
    pub performance: f64,
}

impl Mark {
    /// Parse `EVENT=PERFORMANCE`, e.g. `Poids=1450`.
    pub fn parse(s: &str) -> Result<Self> {
        let Some((event, value)) = s.split_once('=') else {
            bail!("Mark must look like EVENT=PERFORMANCE: {}", s)
        };
        let event = event.trim();
        if event.is_empty() {
            bail!("Mark is missing an event name: {}", s)
        }
        Ok(Mark {
            event: event.to_string(),
            performance: value.trim().parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarkScore {
    pub event: String,
    pub performance: f64,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CombinedScore {
    /// Sum of the mark points
    pub total: u64,
    pub marks: Vec<MarkScore>,
    /// Events of the chosen competition with no mark supplied
    pub missing: Vec<String>,
}

impl CombinedScore {
    pub fn tier(&self, competition: Option<CombinedEvent>) -> Tier {
        let scale = competition
            .map(CombinedEvent::tier_scale)
            .unwrap_or(TierScale::SingleEvent);
        Tier::for_points(self.total, scale)
    }
}

/// Score every mark leniently and add the points up.
///
/// A mark that cannot be scored adds 0 rather than failing the total.
pub fn score_combined(
    table: &EventTable,
    sex: &str,
    marks: &[Mark],
    competition: Option<CombinedEvent>,
) -> CombinedScore {
    let marks: Vec<MarkScore> = marks
        .iter()
        .map(|mark| MarkScore {
            event: mark.event.clone(),
            performance: mark.performance,
            points: score_event(table, &mark.event, sex, mark.performance),
        })
        .collect();

    let total = marks.iter().map(|m| u64::from(m.points)).sum();

    let missing = competition
        .map(|c| {
            c.events()
                .iter()
                .filter(|name| !marks.iter().any(|m| m.event == **name))
                .map(|name| name.to_string())
                .collect()
        })
        .unwrap_or_default();

    CombinedScore {
        total,
        marks,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(event: &str, performance: f64) -> Mark {
        Mark {
            event: event.to_string(),
            performance,
        }
    }

    #[test]
    fn test_parse_mark() {
        assert_eq!(Mark::parse("Poids=1450").unwrap(), mark("Poids", 1450.0));
        assert_eq!(Mark::parse(" 100m = 11.2 ").unwrap(), mark("100m", 11.2));
        assert!(Mark::parse("100m").is_err());
        assert!(Mark::parse("=11.2").is_err());
        assert!(Mark::parse("100m=fast").is_err());
    }

    #[test]
    fn test_total_is_sum_of_marks() {
        let table = EventTable::default();
        let result = score_combined(
            &table,
            "M",
            &[mark("100m", 11.2), mark("Poids", 1650.0), mark("Longueur", 700.0)],
            None,
        );
        assert_eq!(result.total, 817 + 882 + 814);
        assert_eq!(result.marks.len(), 3);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_bad_mark_does_not_fail_total() {
        let table = EventTable::default();
        let result = score_combined(
            &table,
            "M",
            &[mark("100m", 11.2), mark("Marteau", 5000.0)],
            None,
        );
        assert_eq!(result.total, 817);
        assert_eq!(result.marks[1].points, 0);
    }

    #[test]
    fn test_huge_marks_do_not_overflow_total() {
        let table = EventTable::default();
        // Each mark scores over 2^31 points; off-table marks count as 0
        let result = score_combined(
            &table,
            "M",
            &[mark("Javelot", 7e9), mark("Javelot", 7e9), mark("Javelot", 1e12)],
            None,
        );
        let each = u64::from(result.marks[0].points);
        assert!(each > u64::from(u32::MAX) / 2);
        assert_eq!(result.total, 2 * each);
        assert_eq!(result.marks[2].points, 0);
    }

    #[test]
    fn test_missing_events_reported() {
        let table = EventTable::default();
        let result = score_combined(
            &table,
            "M",
            &[mark("100m", 11.2)],
            Some(CombinedEvent::Decathlon),
        );
        assert_eq!(result.missing.len(), 9);
        assert!(!result.missing.contains(&"100m".to_string()));
        assert_eq!(result.missing[0], "Longueur");
    }

    #[test]
    fn test_competition_events_are_calibrated() {
        let table = EventTable::default();
        for name in CombinedEvent::Decathlon.events() {
            assert!(table.get(name).and_then(|e| e.male).is_some(), "{}", name);
        }
        for name in CombinedEvent::Heptathlon.events() {
            assert!(table.get(name).and_then(|e| e.female).is_some(), "{}", name);
        }
    }

    #[test]
    fn test_tier_uses_competition_scale() {
        let table = EventTable::default();
        let result = score_combined(&table, "M", &[mark("100m", 11.2)], None);
        assert_eq!(result.tier(None), Tier::Outstanding);
        assert_eq!(result.tier(Some(CombinedEvent::Decathlon)), Tier::Unranked);
    }
}
