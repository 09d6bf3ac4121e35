//! Responsibility scoring for a single key event.
//!
//! A fixed rule table shifts a 33/34/33 individual/collective/tactical split
//! depending on the event type, phase, position and recent turnovers, then
//! normalizes the result so the three shares always add up to 100.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::zones::ScorerZone;
use crate::events::{EventKind, MatchEvent, Phase};

/// Width of the turnover look-back window before a goal, in minutes
pub const TURNOVER_LOOKBACK_MINUTES: i32 = 5;

/// Goals finished at or beyond this x point to a lost duel near goal
pub const CLOSE_RANGE_GOAL_X: f64 = 85.0;

/// Turnovers at or beyond this x leave the team exposed
pub const EXPOSED_TURNOVER_X: f64 = 55.0;

/// Shots at or beyond this x were conceded near the box
pub const CLOSE_RANGE_SHOT_X: f64 = 80.0;

/// Recommendation used when no rule produced one
pub const DEFAULT_RECOMMENDATION: &str =
    "Gather more context or annotate the action to improve the explanation.";

/// Individual/collective/tactical shares of responsibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibilitySplit {
    pub individual: i32,
    pub collective: i32,
    pub tactical: i32,
}

impl ResponsibilitySplit {
    /// Starting point before any rule fires
    pub const BASE: Self = Self {
        individual: 33,
        collective: 34,
        tactical: 33,
    };

    pub const fn new(individual: i32, collective: i32, tactical: i32) -> Self {
        Self {
            individual,
            collective,
            tactical,
        }
    }

    /// Return a copy shifted by the given deltas
    pub fn shifted(self, individual: i32, collective: i32, tactical: i32) -> Self {
        Self {
            individual: self.individual + individual,
            collective: self.collective + collective,
            tactical: self.tactical + tactical,
        }
    }

    pub fn total(&self) -> i32 {
        self.individual + self.collective + self.tactical
    }

    /// Rescale so the three shares add up to exactly 100
    pub fn normalized(self) -> Self {
        let (individual, collective, tactical) =
            clamp_to_100(self.individual, self.collective, self.tactical);
        Self::new(individual, collective, tactical)
    }
}

/// Rescale a triple so that it sums to exactly 100.
///
/// An already balanced triple is returned as-is and an all-zero triple maps to
/// 34/33/33. Otherwise the first two values are rescaled and rounded (ties to
/// even) and the third takes whatever is left, including all rounding error.
pub fn clamp_to_100(a: i32, b: i32, c: i32) -> (i32, i32, i32) {
    let total = i64::from(a) + i64::from(b) + i64::from(c);
    if total == 100 {
        return (a, b, c);
    }
    if total == 0 {
        return (34, 33, 33);
    }

    let scale = |value: i32| (f64::from(value) * 100.0 / total as f64).round_ties_even() as i64;
    let a = scale(a);
    let b = scale(b);
    let c = 100 - a - b;
    (saturate(a), saturate(b), saturate(c))
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// How much the rule table trusts its own assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        };
        f.write_str(label)
    }
}

/// Outcome of analyzing one key event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsibilityResult {
    pub individual: i32,
    pub collective: i32,
    pub tactical: i32,
    pub explanation: String,
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
}

impl ResponsibilityResult {
    pub fn split(&self) -> ResponsibilitySplit {
        ResponsibilitySplit::new(self.individual, self.collective, self.tactical)
    }
}

/// Running state threaded through the rules
#[derive(Debug)]
struct Assessment {
    split: ResponsibilitySplit,
    explanation: Vec<String>,
    recommendations: Vec<String>,
    confidence: Confidence,
}

impl Assessment {
    fn new(confidence: Confidence, opening: String) -> Self {
        Self {
            split: ResponsibilitySplit::BASE,
            explanation: vec![opening],
            recommendations: Vec::new(),
            confidence,
        }
    }

    fn shift(mut self, individual: i32, collective: i32, tactical: i32) -> Self {
        self.split = self.split.shifted(individual, collective, tactical);
        self
    }

    fn note(mut self, sentence: &str) -> Self {
        self.explanation.push(sentence.to_string());
        self
    }

    fn recommend(mut self, recommendations: &[&str]) -> Self {
        self.recommendations
            .extend(recommendations.iter().map(|r| r.to_string()));
        self
    }

    fn finish(self) -> ResponsibilityResult {
        let split = self.split.normalized();
        let recommendations = if self.recommendations.is_empty() {
            vec![DEFAULT_RECOMMENDATION.to_string()]
        } else {
            self.recommendations
        };

        ResponsibilityResult {
            individual: split.individual,
            collective: split.collective,
            tactical: split.tactical,
            explanation: self.explanation.join(" "),
            recommendations,
            confidence: self.confidence,
        }
    }
}

/// Split responsibility for `event`, using `match_events` to look for recent turnovers
pub fn analyze_key_event(event: &MatchEvent, match_events: &[MatchEvent]) -> ResponsibilityResult {
    let zone = ScorerZone::from_x(event.x);
    let phase = event.phase_kind();
    let kind = event.kind();

    let assessment = match kind {
        EventKind::Goal => assess_goal(event, phase, zone, match_events),
        EventKind::Turnover => assess_turnover(event, phase, zone),
        EventKind::Shot => assess_shot(event, phase, zone),
        EventKind::Other => Assessment::new(
            Confidence::Low,
            "Event analysed with the baseline rules.".to_string(),
        ),
    };

    let result = assessment.finish();
    debug!(
        "Scored {:?} at {}' ({}): {}/{}/{} confidence {}",
        kind,
        event.minute,
        zone,
        result.individual,
        result.collective,
        result.tactical,
        result.confidence
    );
    result
}

fn assess_goal(
    event: &MatchEvent,
    phase: Phase,
    zone: ScorerZone,
    match_events: &[MatchEvent],
) -> Assessment {
    let mut assessment = Assessment::new(
        Confidence::High,
        format!(
            "Goal conceded analysed around minute {}, in the {}.",
            event.minute, zone
        ),
    );

    match phase {
        Phase::Transition => {
            assessment = assessment
                .shift(-5, 12, 8)
                .note("The context points to a transition phase, often linked to an imbalance after losing the ball.")
                .recommend(&[
                    "Reduce the distances between lines when possession is lost.",
                    "Define counter-pressing and rest-defense rules to secure possession losses.",
                ]);
        }
        Phase::SetPiece => {
            assessment = assessment
                .shift(-5, 5, 15)
                .note("The goal comes from a set piece, where structure and organisation prevail.")
                .recommend(&[
                    "Review set-piece organisation and the marking scheme (zonal or man-to-man).",
                ]);
        }
        Phase::BuildUp | Phase::Other => {}
    }

    if event.x >= CLOSE_RANGE_GOAL_X {
        assessment = assessment
            .shift(6, 0, 0)
            .note("The action ends very close to goal, which may reflect a lost duel or a late intervention.")
            .recommend(&["Work on defensive duels close to the box and on delaying the attacker."]);
    }

    if has_recent_turnover(event.minute, match_events) {
        assessment = assessment
            .shift(0, 6, 0)
            .note("A recent turnover was detected before the goal, which raises the transition risk.")
            .recommend(&["Improve risk management in central areas and passing under pressure."]);
    }

    assessment
}

fn assess_turnover(event: &MatchEvent, phase: Phase, zone: ScorerZone) -> Assessment {
    let mut assessment = Assessment::new(
        Confidence::Medium,
        format!("Turnover at minute {} in the {}.", event.minute, zone),
    )
    .shift(12, 6, -6);

    if phase == Phase::Transition {
        assessment = assessment
            .shift(0, 6, 0)
            .note("The turnover happens in an unstable phase, the team is potentially open.")
            .recommend(&[
                "Limit central risk-taking during transition phases.",
                "Provide closer support to the ball carrier to offer a short option.",
            ]);
    }

    if event.x >= EXPOSED_TURNOVER_X {
        assessment = assessment
            .shift(0, 4, 0)
            .note("The turnover is in a central or offensive area, which exposes the team to opponent transitions.")
            .recommend(&["Secure possession losses with cover behind the ball (rest-defense)."]);
    }

    assessment
}

fn assess_shot(event: &MatchEvent, phase: Phase, zone: ScorerZone) -> Assessment {
    let mut assessment = Assessment::new(
        Confidence::Low,
        format!("Shot at minute {} in the {}.", event.minute, zone),
    )
    .shift(-2, 8, 4);

    if phase == Phase::Transition {
        assessment = assessment
            .shift(0, 6, 0)
            .note("Shot conceded in transition, a sign of lacking control after losing the ball.")
            .recommend(&["Work on recovery runs and protecting the central axis in transition."]);
    }

    if event.x >= CLOSE_RANGE_SHOT_X {
        assessment = assessment
            .shift(4, 0, 0)
            .note("Shot conceded near the box, possibly late closing down or pressing.")
            .recommend(&["Improve closing down the ball carrier and pressing near the box."]);
    }

    assessment
}

/// Any turnover in `[minute - 5, minute]`, regardless of team
fn has_recent_turnover(minute: i32, match_events: &[MatchEvent]) -> bool {
    let window = minute.saturating_sub(TURNOVER_LOOKBACK_MINUTES)..=minute;
    match_events
        .iter()
        .any(|e| e.kind() == EventKind::Turnover && window.contains(&e.minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal_at(minute: i32, phase: &str, x: f64) -> MatchEvent {
        MatchEvent::new(1, "GOAL")
            .with_time(minute, 0)
            .with_phase(phase)
            .with_position(x, 50.0)
    }

    #[test]
    fn test_clamp_fixed_points() {
        assert_eq!(clamp_to_100(0, 0, 0), (34, 33, 33));
        assert_eq!(clamp_to_100(33, 34, 33), (33, 34, 33));
        assert_eq!(clamp_to_100(50, 25, 25), (50, 25, 25));
    }

    #[test]
    fn test_clamp_always_sums_to_100() {
        for a in (0..120).step_by(7) {
            for b in (0..120).step_by(11) {
                for c in (0..120).step_by(13) {
                    let (x, y, z) = clamp_to_100(a, b, c);
                    assert_eq!(x + y + z, 100, "({}, {}, {})", a, b, c);
                }
            }
        }
    }

    #[test]
    fn test_clamp_third_component_absorbs_rounding() {
        // 1/3 each: the first two round down and the third takes the rest
        assert_eq!(clamp_to_100(1, 1, 1), (33, 33, 34));
        // 2.5 rounds to even on the first two components
        assert_eq!(clamp_to_100(1, 1, 38), (2, 2, 96));
    }

    #[test]
    fn test_goal_in_transition_after_turnover() {
        let turnover = MatchEvent::new(1, "TURNOVER").with_time(67, 0).with_position(60.0, 40.0);
        let goal = goal_at(70, "transition", 90.0);
        let events = vec![turnover, goal.clone()];

        let result = analyze_key_event(&goal, &events);

        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.individual + result.collective + result.tactical, 100);
        // 34/52/41 rescaled over 127
        assert_eq!(result.split(), ResponsibilitySplit::new(27, 41, 32));
        assert!(result.explanation.contains("transition"));
        assert!(result.explanation.contains("very close to goal"));
        assert!(result.explanation.contains("recent turnover"));
        assert!(result.explanation.contains("finishing zone"));
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_goal_from_set_piece() {
        let goal = goal_at(30, "Set-Piece", 70.0);
        let result = analyze_key_event(&goal, &[]);

        // 28/39/48 over 115
        assert_eq!(result.split(), ResponsibilitySplit::new(24, 34, 42));
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].contains("marking scheme"));
    }

    #[test]
    fn test_turnover_lookback_window_is_inclusive() {
        let goal = goal_at(70, "build-up", 50.0);

        let at_edge = vec![MatchEvent::new(1, "turnover").with_time(65, 0)];
        let too_early = vec![MatchEvent::new(1, "TURNOVER").with_time(64, 59)];
        let after = vec![MatchEvent::new(1, "TURNOVER").with_time(71, 0)];

        assert!(analyze_key_event(&goal, &at_edge).explanation.contains("recent turnover"));
        assert!(!analyze_key_event(&goal, &too_early).explanation.contains("recent turnover"));
        assert!(!analyze_key_event(&goal, &after).explanation.contains("recent turnover"));
    }

    #[test]
    fn test_plain_goal_keeps_base_split() {
        let goal = goal_at(12, "build-up", 40.0);
        let result = analyze_key_event(&goal, &[]);

        assert_eq!(result.split(), ResponsibilitySplit::BASE);
        assert_eq!(result.recommendations, vec![DEFAULT_RECOMMENDATION.to_string()]);
        assert_eq!(
            result.explanation,
            "Goal conceded analysed around minute 12, in the midfield."
        );
    }

    #[test]
    fn test_turnover_in_transition_high_up() {
        let event = MatchEvent::new(1, "TURNOVER")
            .with_time(40, 0)
            .with_phase("transition")
            .with_position(60.0, 50.0);
        let result = analyze_key_event(&event, &[]);

        assert_eq!(result.confidence, Confidence::Medium);
        // 45/50/27 over 122
        assert_eq!(result.split(), ResponsibilitySplit::new(37, 41, 22));
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn test_shot_in_build_up_from_distance() {
        let shot = MatchEvent::new(1, "SHOT")
            .with_time(10, 0)
            .with_phase("build-up")
            .with_position(20.0, 50.0);
        let result = analyze_key_event(&shot, &[]);

        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.individual + result.collective + result.tactical, 100);
        assert_eq!(result.recommendations, vec![DEFAULT_RECOMMENDATION.to_string()]);
        assert!(!result.explanation.contains("transition"));
        assert!(!result.explanation.contains("near the box"));
    }

    #[test]
    fn test_shot_close_range_in_transition() {
        let shot = MatchEvent::new(1, "shot")
            .with_time(80, 0)
            .with_phase("transition")
            .with_position(80.0, 50.0);
        let result = analyze_key_event(&shot, &[]);

        // 35/48/37 over 120
        assert_eq!(result.split(), ResponsibilitySplit::new(29, 40, 31));
        assert_eq!(result.recommendations.len(), 2);
    }

    #[test]
    fn test_unknown_event_type() {
        let event = MatchEvent::default();
        let result = analyze_key_event(&event, &[]);

        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.split(), ResponsibilitySplit::BASE);
        assert_eq!(result.explanation, "Event analysed with the baseline rules.");
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_extreme_minutes_do_not_overflow() {
        let goal = goal_at(i32::MIN, "build-up", 50.0);
        let turnover = MatchEvent::new(1, "TURNOVER").with_time(i32::MIN, 0);

        let result = analyze_key_event(&goal, &[turnover]);
        assert_eq!(result.individual + result.collective + result.tactical, 100);
        assert!(result.explanation.contains("recent turnover"));

        let late = goal_at(i32::MAX, "build-up", 50.0);
        assert_eq!(analyze_key_event(&late, &[]).split().total(), 100);
    }

    #[test]
    fn test_clamp_extreme_inputs() {
        assert_eq!(clamp_to_100(i32::MAX, i32::MAX, i32::MAX), (33, 33, 34));
        assert_eq!(clamp_to_100(i32::MIN, 0, 0), (100, 0, 0));
    }

    #[test]
    fn test_close_range_goal_threshold() {
        let at_threshold = analyze_key_event(&goal_at(20, "build-up", 85.0), &[]);
        assert!(at_threshold.explanation.contains("very close to goal"));
        assert_eq!(at_threshold.recommendations.len(), 1);
        assert!(at_threshold.recommendations[0].contains("defensive duels"));

        let just_short = analyze_key_event(&goal_at(20, "build-up", 84.9), &[]);
        assert!(!just_short.explanation.contains("very close to goal"));
        assert_eq!(just_short.recommendations, vec![DEFAULT_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_exposed_turnover_threshold() {
        let turnover_at = |x: f64| {
            MatchEvent::new(1, "TURNOVER")
                .with_time(25, 0)
                .with_phase("build-up")
                .with_position(x, 50.0)
        };

        let at_threshold = analyze_key_event(&turnover_at(55.0), &[]);
        assert!(at_threshold.explanation.contains("offensive area"));
        assert_eq!(at_threshold.recommendations.len(), 1);
        assert!(at_threshold.recommendations[0].contains("rest-defense"));

        let just_short = analyze_key_event(&turnover_at(54.9), &[]);
        assert!(!just_short.explanation.contains("offensive area"));
        assert_eq!(just_short.recommendations, vec![DEFAULT_RECOMMENDATION.to_string()]);
        assert_eq!(just_short.confidence, Confidence::Medium);
    }
}

