use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::{
    evaluate_event, score_event, score_recovery, EventTable, Measurements, MetricTable,
    ScoringError,
};

/// `{ event, sex, performance }`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EventScoreRequest {
    pub event: String,
    pub sex: String,
    #[serde(alias = "perf")]
    pub performance: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EventScoreResponse {
    pub score: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RecoveryResponse {
    pub recovery_score: f64,
}

/// Either request shape; a recovery request is a bare map of readings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScoreRequest {
    Event(EventScoreRequest),
    Recovery(Measurements),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ScoreResponse {
    Event(EventScoreResponse),
    Recovery(RecoveryResponse),
}

impl ScoreRequest {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Request is neither an event nor a recovery request")
    }

    /// Answer the request. In strict mode an event request that cannot be
    /// scored is an error instead of a 0.
    pub fn respond(
        &self,
        events: &EventTable,
        metrics: &MetricTable,
        strict: bool,
    ) -> Result<ScoreResponse, ScoringError> {
        match self {
            ScoreRequest::Event(req) => {
                let score = if strict {
                    evaluate_event(events, &req.event, &req.sex, req.performance)?.points
                } else {
                    score_event(events, &req.event, &req.sex, req.performance)
                };
                Ok(ScoreResponse::Event(EventScoreResponse { score }))
            }
            ScoreRequest::Recovery(measurements) => {
                Ok(ScoreResponse::Recovery(RecoveryResponse {
                    recovery_score: score_recovery(metrics, measurements),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respond(json: &str, strict: bool) -> Result<ScoreResponse, ScoringError> {
        ScoreRequest::parse(json)
            .unwrap()
            .respond(&EventTable::default(), &MetricTable::default(), strict)
    }

    #[test]
    fn test_event_request() {
        let response = respond(r#"{"event": "100m", "sex": "M", "performance": 11.2}"#, false).unwrap();
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"score":817}"#);
    }

    #[test]
    fn test_event_request_perf_alias() {
        let response = respond(r#"{"event": "Poids", "sex": "M", "perf": 1650}"#, false).unwrap();
        assert_eq!(response, ScoreResponse::Event(EventScoreResponse { score: 882 }));
    }

    #[test]
    fn test_unknown_event_lenient_and_strict() {
        let json = r#"{"event": "Marteau", "sex": "M", "performance": 5000}"#;
        assert_eq!(
            respond(json, false).unwrap(),
            ScoreResponse::Event(EventScoreResponse { score: 0 })
        );
        assert_eq!(
            respond(json, true),
            Err(ScoringError::UnknownEvent("Marteau".to_string()))
        );
    }

    #[test]
    fn test_strict_sub_baseline_is_zero() {
        let json = r#"{"event": "100m", "sex": "F", "performance": 25.0}"#;
        assert_eq!(
            respond(json, true).unwrap(),
            ScoreResponse::Event(EventScoreResponse { score: 0 })
        );
    }

    #[test]
    fn test_recovery_request() {
        let json = r#"{"sleep_duration": 8.0, "sleep_quality": null, "resting_heart_rate": null}"#;
        let response = respond(json, false).unwrap();
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"recovery_score":7.77}"#
        );
    }

    #[test]
    fn test_empty_recovery_request() {
        assert_eq!(
            respond("{}", false).unwrap(),
            ScoreResponse::Recovery(RecoveryResponse { recovery_score: 0.0 })
        );
    }

    #[test]
    fn test_malformed_request() {
        assert!(ScoreRequest::parse(r#"{"event": "100m"}"#).is_err());
        assert!(ScoreRequest::parse("[1, 2]").is_err());
    }
}
