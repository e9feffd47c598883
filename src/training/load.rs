use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded training session.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TrainingSession {
    pub date: NaiveDate,
    /// Session type, e.g. "Sprint - Départ"
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Perceived effort, 0-10
    pub intensity: u8,
}

impl TrainingSession {
    /// Session load: minutes times perceived intensity; 0 without a duration.
    pub fn load(&self) -> f64 {
        self.duration_minutes
            .map(|minutes| f64::from(minutes) * f64::from(self.intensity))
            .unwrap_or(0.0)
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The `days` days ending on `end`, `end` included.
    pub fn ending_on(end: NaiveDate, days: u32) -> Self {
        let span = chrono::Duration::days(i64::from(days.max(1)) - 1);
        DateWindow {
            start: end - span,
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadSummary {
    pub sessions: usize,
    pub mean_intensity: f64,
    /// Averaged over the sessions that recorded a duration
    pub mean_duration_minutes: f64,
    pub total_load: f64,
}

pub fn summarize_load(sessions: &[TrainingSession], window: Option<DateWindow>) -> LoadSummary {
    let selected: Vec<&TrainingSession> = sessions
        .iter()
        .filter(|s| window.map_or(true, |w| w.contains(s.date)))
        .collect();

    if selected.is_empty() {
        return LoadSummary {
            sessions: 0,
            mean_intensity: 0.0,
            mean_duration_minutes: 0.0,
            total_load: 0.0,
        };
    }

    let intensity_sum: f64 = selected.iter().map(|s| f64::from(s.intensity)).sum();
    let durations: Vec<f64> = selected
        .iter()
        .filter_map(|s| s.duration_minutes.map(f64::from))
        .collect();
    let mean_duration_minutes = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    };

    LoadSummary {
        sessions: selected.len(),
        mean_intensity: intensity_sum / selected.len() as f64,
        mean_duration_minutes,
        total_load: selected.iter().map(|s| s.load()).sum(),
    }
}

/// Load sessions from a JSON (`.json`) or YAML file.
pub fn load_sessions(path: &Path) -> Result<Vec<TrainingSession>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sessions file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let sessions = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse sessions: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse sessions: invalid YAML in {}", path.display()))?
    };

    Ok(sessions)
}
