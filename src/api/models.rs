//! API data models

use serde::{Deserialize, Serialize};

use crate::analysis::ResponsibilityResult;
use crate::events::{MatchEvent, MatchInfo};

/// Match entry of the match list
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: i64,
    pub label: String,
    pub score: String,
    pub event_count: usize,
    pub goal_count: usize,
}

/// Event with its timeline label
#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub label: String,
    pub t: f64,
    #[serde(flatten)]
    pub event: MatchEvent,
}

impl From<MatchEvent> for TimelineEvent {
    fn from(event: MatchEvent) -> Self {
        Self {
            label: event.timeline_label(),
            t: event.timeline_position(),
            event,
        }
    }
}

/// Events of one match
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchEvents {
    #[serde(rename = "match")]
    pub info: MatchInfo,
    pub events: Vec<TimelineEvent>,
}

/// Body of `POST /api/analyze`; missing event fields take their defaults
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(flatten)]
    pub event: MatchEvent,
}

/// Analysis of one event
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub result: ResponsibilityResult,
    pub narrative: String,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
