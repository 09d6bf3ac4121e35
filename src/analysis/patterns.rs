//! Match-level pattern aggregation: counts, distributions and insights

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use super::zones::PatternZone;
use crate::events::{EventKind, MatchEvent, Phase};

/// Transition ratio above which transition exposure is reported
pub const TRANSITION_INSIGHT_RATIO: f64 = 0.4;

/// Share of events in the last third above which it is reported
pub const LAST_THIRD_INSIGHT_SHARE: f64 = 0.3;

/// Turnover count above which turnovers are reported
pub const TURNOVER_INSIGHT_COUNT: usize = 2;

pub const HIGH_PRIORITY_RATIO: f64 = 0.5;
pub const MEDIUM_PRIORITY_RATIO: f64 = 0.3;

pub const TRANSITION_INSIGHT: &str = "High exposure in the transition phase.";
pub const LAST_THIRD_INSIGHT: &str = "High volume of opponent actions in the final third.";
pub const TURNOVER_INSIGHT: &str = "Significant number of potentially dangerous turnovers.";
pub const NO_VULNERABILITY_INSIGHT: &str =
    "No major structural vulnerability detected on this match (heuristic rules).";

/// Urgency of coaching follow-up for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    pub fn from_transition_ratio(ratio: f64) -> Self {
        if ratio > HIGH_PRIORITY_RATIO {
            PriorityLevel::High
        } else if ratio > MEDIUM_PRIORITY_RATIO {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriorityLevel::Low => "Low",
            PriorityLevel::Medium => "Medium",
            PriorityLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Aggregated view of one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub total_events: usize,
    pub total_goals: usize,
    pub total_shots: usize,
    pub total_turnovers: usize,

    /// Counts keyed by the phase exactly as stored (no case folding)
    pub phase_distribution: BTreeMap<String, usize>,

    pub zone_distribution: BTreeMap<PatternZone, usize>,

    /// Share of events in transition, rounded to 2 decimals
    pub transition_risk_ratio: f64,

    pub insights: Vec<String>,
    pub priority_level: PriorityLevel,
}

impl PatternSummary {
    pub fn zone_count(&self, zone: PatternZone) -> usize {
        self.zone_distribution.get(&zone).copied().unwrap_or(0)
    }
}

/// Aggregate all events of a match into a [`PatternSummary`]
pub fn compute_match_patterns(match_events: &[MatchEvent]) -> PatternSummary {
    let total_events = match_events.len();
    let count_kind = |kind: EventKind| match_events.iter().filter(|e| e.kind() == kind).count();
    let total_goals = count_kind(EventKind::Goal);
    let total_shots = count_kind(EventKind::Shot);
    let total_turnovers = count_kind(EventKind::Turnover);

    let mut phase_distribution = BTreeMap::new();
    let mut zone_distribution = BTreeMap::new();
    for event in match_events {
        *phase_distribution.entry(event.phase.clone()).or_insert(0) += 1;
        *zone_distribution.entry(PatternZone::from_x(event.x)).or_insert(0) += 1;
    }

    let transition_events = match_events
        .iter()
        .filter(|e| e.phase_kind() == Phase::Transition)
        .count();
    let transition_risk_ratio = if total_events > 0 {
        round_to_hundredths(transition_events as f64 / total_events as f64)
    } else {
        0.0
    };

    let last_third = zone_distribution
        .get(&PatternZone::LastThird)
        .copied()
        .unwrap_or(0);

    let mut insights = Vec::new();
    if transition_risk_ratio > TRANSITION_INSIGHT_RATIO {
        insights.push(TRANSITION_INSIGHT.to_string());
    }
    if last_third as f64 > total_events as f64 * LAST_THIRD_INSIGHT_SHARE {
        insights.push(LAST_THIRD_INSIGHT.to_string());
    }
    if total_turnovers > TURNOVER_INSIGHT_COUNT {
        insights.push(TURNOVER_INSIGHT.to_string());
    }
    if insights.is_empty() {
        insights.push(NO_VULNERABILITY_INSIGHT.to_string());
    }

    let priority_level = PriorityLevel::from_transition_ratio(transition_risk_ratio);

    debug!(
        "Aggregated {} events: transition ratio {:.2}, priority {}",
        total_events, transition_risk_ratio, priority_level
    );

    PatternSummary {
        total_events,
        total_goals,
        total_shots,
        total_turnovers,
        phase_distribution,
        zone_distribution,
        transition_risk_ratio,
        insights,
        priority_level,
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
