pub mod combined;
pub mod config;
pub mod curves;
pub mod engine;
pub mod recovery;
pub mod tiers;
pub mod validation;

pub use combined::{score_combined, CombinedEvent, CombinedScore, Mark, MarkScore};
pub use config::*;
pub use engine::{evaluate_event, score_event, EventScore, EventTable, ScoringError, Sex};
pub use recovery::{
    evaluate_recovery, normalize_metric, score_recovery, HealthCheck, Measurements,
    MetricContribution, MetricTable, RecoveryScore,
};
pub use tiers::{Tier, TierScale};
pub use validation::{validate_events, validate_metrics};
