use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{
    CombinedEvent, CombinedScore, Coefficients, EventScore, EventTable, RecoveryScore, Tier,
    TierScale,
};
use crate::training::LoadSummary;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Colour points by tier
fn paint_points(text: &str, tier: Tier, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match tier {
        Tier::Outstanding => text.bright_green().bold().to_string(),
        Tier::Strong => text.yellow().bold().to_string(),
        Tier::Solid => text.bright_yellow().to_string(),
        Tier::Developing => text.red().to_string(),
        Tier::Novice => text.bright_red().dimmed().to_string(),
        Tier::Unranked => text.dimmed().to_string(),
    }
}

/// Format a recovery index with one band per third of the scale
pub fn format_recovery_value(score: f64, use_colors: bool) -> String {
    let text = format!("{:.2}/10", score);
    if !use_colors {
        text
    } else if score >= 7.0 {
        text.green().bold().to_string()
    } else if score >= 4.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// One-line result for a single mark, e.g. `100m (M) 11.2 s -> 817 pts`
pub fn format_event_score(score: &EventScore, use_colors: bool) -> String {
    let input_unit = score.kind.input_unit().symbol();
    let tier = Tier::for_points(u64::from(score.points), TierScale::SingleEvent);
    let points = paint_points(&format!("{} pts", score.points), tier, use_colors);
    let event = if use_colors {
        score.event.bold().to_string()
    } else {
        score.event.clone()
    };
    format!(
        "{} ({}) {} {} -> {}",
        event, score.sex, score.performance, input_unit, points
    )
}

/// Multi-line breakdown of a scored mark (for verbose mode)
pub fn format_event_detail(score: &EventScore) -> String {
    let c = &score.coefficients;
    format!(
        "  Kind: {}\n  Converted: {} {}\n  Coefficients: a={} b={} c={}\n  Margin: {:.4}\n  Tier: {}",
        score.kind.as_str(),
        score.converted,
        score.unit.symbol(),
        c.a,
        c.b,
        c.c,
        score.margin,
        Tier::for_points(u64::from(score.points), TierScale::SingleEvent).label()
    )
}

/// Table of marks with a total row
pub fn format_combined(
    result: &CombinedScore,
    competition: Option<CombinedEvent>,
    use_colors: bool,
) -> String {
    if result.marks.is_empty() {
        return "No marks given.".to_string();
    }

    let name_width = result
        .marks
        .iter()
        .map(|m| m.event.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut lines: Vec<String> = result
        .marks
        .iter()
        .map(|mark| {
            let tier = Tier::for_points(u64::from(mark.points), TierScale::SingleEvent);
            let points = format!("{:>5}", mark.points);
            format!(
                "{:<name_width$}  {:>9}  {}",
                mark.event,
                mark.performance,
                paint_points(&points, tier, use_colors),
                name_width = name_width
            )
        })
        .collect();

    let rule_width = name_width + 18;
    lines.push("-".repeat(rule_width));

    let tier = result.tier(competition);
    let total = format!("{:>5}", result.total);
    lines.push(format!(
        "{:<name_width$}  {:>9}  {}  {}",
        "Total",
        "",
        paint_points(&total, tier, use_colors),
        tier.label(),
        name_width = name_width
    ));

    if !result.missing.is_empty() {
        lines.push(format!("Missing: {}", result.missing.join(", ")));
    }

    lines.join("\n")
}

/// Format marks as tab-separated values for scripting
/// Columns: event, performance, points; last line is the total
pub fn format_combined_tsv(result: &CombinedScore) -> String {
    result
        .marks
        .iter()
        .map(|m| format!("{}\t{}\t{}", m.event, m.performance, m.points))
        .chain(std::iter::once(format!("total\t\t{}", result.total)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recovery index, optionally followed by per-metric contributions
pub fn format_recovery(result: &RecoveryScore, detailed: bool, use_colors: bool) -> String {
    let mut lines = vec![format!(
        "Recovery score: {}",
        format_recovery_value(result.score, use_colors)
    )];

    if result.contributions.is_empty() {
        lines.push("  No recognised readings supplied.".to_string());
    }

    if detailed {
        for c in &result.contributions {
            lines.push(format!(
                "  {:<26} {:>8}  -> {:.3} (weight {})",
                c.metric, c.value, c.normalized, c.weight
            ));
        }
    }

    if !result.ignored.is_empty() {
        lines.push(format!("  Ignored: {}", result.ignored.join(", ")));
    }

    lines.join("\n")
}

fn format_coefficients(c: Option<Coefficients>) -> String {
    match c {
        Some(c) => format!("{} / {} / {}", c.a, c.b, c.c),
        None => "-".to_string(),
    }
}

/// List the points table: event, kind, unit, then male and female coefficients
pub fn format_event_table(table: &EventTable, use_colors: bool) -> String {
    if table.is_empty() {
        return "No events configured.".to_string();
    }

    let rows: Vec<[String; 5]> = table
        .iter()
        .map(|e| {
            [
                e.name.clone(),
                e.kind.as_str().to_string(),
                format!("{} -> {}", e.kind.input_unit().symbol(), e.calibrated_unit().symbol()),
                format_coefficients(e.male),
                format_coefficients(e.female),
            ]
        })
        .collect();

    let header = ["Event", "Kind", "Unit", "Male a / b / c", "Female a / b / c"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| -> String {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ");
        let line = line.trim_end().to_string();
        match get_terminal_width() {
            Some(width) if line.chars().count() > width => line.chars().take(width).collect(),
            _ => line,
        }
    };

    let header_line = render(&header.map(String::from));
    let header_line = if use_colors {
        header_line.bold().to_string()
    } else {
        header_line
    };

    std::iter::once(header_line)
        .chain(rows.iter().map(|row| render(row)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_load_summary(summary: &LoadSummary) -> String {
    if summary.sessions == 0 {
        return "No training sessions in range.".to_string();
    }
    format!(
        "Sessions: {}\nMean intensity: {:.1}\nMean duration: {:.0} min\nTraining load: {:.0}",
        summary.sessions, summary.mean_intensity, summary.mean_duration_minutes, summary.total_load
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{
        evaluate_event, evaluate_recovery, score_combined, Mark, Measurements, MetricTable,
    };

    fn combined() -> CombinedScore {
        let table = EventTable::default();
        score_combined(
            &table,
            "M",
            &[
                Mark::parse("100m=11.2").unwrap(),
                Mark::parse("Poids=1650").unwrap(),
            ],
            Some(CombinedEvent::Decathlon),
        )
    }

    #[test]
    fn test_format_event_score() {
        let score = evaluate_event(&EventTable::default(), "100m", "M", 11.2).unwrap();
        assert_eq!(format_event_score(&score, false), "100m (M) 11.2 s -> 817 pts");
    }

    #[test]
    fn test_format_event_score_throw_shows_input_unit() {
        let score = evaluate_event(&EventTable::default(), "Poids", "F", 1400.0).unwrap();
        let line = format_event_score(&score, false);
        assert!(line.starts_with("Poids (F) 1400 cm -> "));
    }

    #[test]
    fn test_format_event_detail() {
        let score = evaluate_event(&EventTable::default(), "Poids", "M", 1650.0).unwrap();
        let detail = format_event_detail(&score);
        assert!(detail.contains("Kind: throw"));
        assert!(detail.contains("Converted: 16.5 m"));
        assert!(detail.contains("a=51.39 b=1.5 c=1.05"));
        assert!(detail.contains("Tier: outstanding"));
    }

    #[test]
    fn test_format_combined() {
        let output = format_combined(&combined(), Some(CombinedEvent::Decathlon), false);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("100m"));
        assert!(lines[0].ends_with("817"));
        assert!(lines[1].contains("882"));
        assert!(lines[3].contains("1699"));
        assert!(lines[3].ends_with("unranked"));
        assert!(lines[4].starts_with("Missing: Longueur, Hauteur"));
    }

    #[test]
    fn test_format_combined_empty() {
        let result = CombinedScore {
            total: 0,
            marks: vec![],
            missing: vec![],
        };
        assert_eq!(format_combined(&result, None, false), "No marks given.");
    }

    #[test]
    fn test_format_combined_tsv() {
        let output = format_combined_tsv(&combined());
        assert_eq!(output, "100m\t11.2\t817\nPoids\t1650\t882\ntotal\t\t1699");
    }

    #[test]
    fn test_format_recovery() {
        let mut m = Measurements::new();
        m.insert("sleep_duration".to_string(), Some(8.0));
        m.insert("mood".to_string(), Some(4.0));
        let result = evaluate_recovery(&MetricTable::default(), &m);

        let short = format_recovery(&result, false, false);
        assert!(short.starts_with("Recovery score: 7.77/10"));
        assert!(short.contains("Ignored: mood"));
        assert!(!short.contains("sleep_duration"));

        let detailed = format_recovery(&result, true, false);
        assert!(detailed.contains("sleep_duration"));
        assert!(detailed.contains("0.777"));
    }

    #[test]
    fn test_format_recovery_no_data() {
        let result = evaluate_recovery(&MetricTable::default(), &Measurements::new());
        let output = format_recovery(&result, false, false);
        assert!(output.contains("0.00/10"));
        assert!(output.contains("No recognised readings"));
    }

    #[test]
    fn test_format_event_table() {
        let output = format_event_table(&EventTable::default(), false);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("Event"));
        assert_eq!(lines.len(), 1 + EventTable::default().len());
        let shot = lines.iter().find(|l| l.starts_with("Poids")).unwrap();
        assert!(shot.contains("cm -> m"));
        let hurdles = lines.iter().find(|l| l.starts_with("110mH")).unwrap();
        assert!(hurdles.contains("5.74352 / 28.5 / 1.92"));
    }

    #[test]
    fn test_format_load_summary() {
        let summary = LoadSummary {
            sessions: 3,
            mean_intensity: 6.0,
            mean_duration_minutes: 75.0,
            total_load: 1080.0,
        };
        let output = format_load_summary(&summary);
        assert!(output.contains("Sessions: 3"));
        assert!(output.contains("Mean intensity: 6.0"));
        assert!(output.contains("Training load: 1080"));
    }
}
