//! Match events and match metadata as loaded from the event tables.
//!
//! Event `type` and `phase` are kept exactly as stored; classification into
//! [`EventKind`] and [`Phase`] happens on demand so the raw values stay
//! available for display and for the raw-cased phase distribution.

pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::EventStore;

/// Default coordinate for events recorded without a position
pub const DEFAULT_COORDINATE: f64 = 50.0;

fn default_coordinate() -> f64 {
    DEFAULT_COORDINATE
}

/// A single recorded action of a match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    #[serde(default)]
    pub match_id: i64,

    #[serde(default)]
    pub minute: i32,

    #[serde(default)]
    pub second: i32,

    #[serde(default)]
    pub team: String,

    #[serde(default)]
    pub player: String,

    /// Raw event type (GOAL, SHOT, TURNOVER, ...)
    #[serde(rename = "type", default)]
    pub event_type: String,

    /// Free-form game phase (transition, set-piece, build-up, ...)
    #[serde(default)]
    pub phase: String,

    /// Position along the pitch, 0 = own goal line, 100 = opponent goal line
    #[serde(default = "default_coordinate")]
    pub x: f64,

    #[serde(default = "default_coordinate")]
    pub y: f64,

    #[serde(default)]
    pub description: String,
}

impl Default for MatchEvent {
    fn default() -> Self {
        Self {
            match_id: 0,
            minute: 0,
            second: 0,
            team: String::new(),
            player: String::new(),
            event_type: String::new(),
            phase: String::new(),
            x: DEFAULT_COORDINATE,
            y: DEFAULT_COORDINATE,
            description: String::new(),
        }
    }
}

/// Event categories the analysis rules know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Goal,
    Shot,
    Turnover,
    Other,
}

impl EventKind {
    /// Classify a raw event type, ignoring case
    pub fn classify(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "GOAL" => EventKind::Goal,
            "SHOT" => EventKind::Shot,
            "TURNOVER" => EventKind::Turnover,
            _ => EventKind::Other,
        }
    }

    /// Whether this kind can be selected for responsibility analysis
    pub fn is_key(&self) -> bool {
        !matches!(self, EventKind::Other)
    }
}

/// Game phases the analysis rules know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Transition,
    SetPiece,
    BuildUp,
    Other,
}

impl Phase {
    /// Classify a raw phase after lower-casing it
    pub fn classify(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "transition" => Phase::Transition,
            "set-piece" => Phase::SetPiece,
            "build-up" => Phase::BuildUp,
            _ => Phase::Other,
        }
    }
}

impl MatchEvent {
    /// Create an event with default position and timing
    pub fn new(match_id: i64, event_type: impl Into<String>) -> Self {
        Self {
            match_id,
            event_type: event_type.into(),
            ..Self::default()
        }
    }

    pub fn with_time(mut self, minute: i32, second: i32) -> Self {
        self.minute = minute;
        self.second = second;
        self
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_actor(mut self, team: impl Into<String>, player: impl Into<String>) -> Self {
        self.team = team.into();
        self.player = player.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(&self) -> EventKind {
        EventKind::classify(&self.event_type)
    }

    pub fn phase_kind(&self) -> Phase {
        Phase::classify(&self.phase)
    }

    /// Label used by the match timeline, e.g. `67:05 • Lyon • TURNOVER • Dupont`
    pub fn timeline_label(&self) -> String {
        format!(
            "{}:{:02} • {} • {} • {}",
            self.minute, self.second, self.team, self.event_type, self.player
        )
    }

    /// Match clock in fractional minutes
    pub fn timeline_position(&self) -> f64 {
        self.minute as f64 + self.second as f64 / 60.0
    }
}

/// Sort events by match clock (minute, then second)
pub fn sort_chronologically(events: &mut [MatchEvent]) {
    events.sort_by_key(|e| (e.minute, e.second));
}

/// Keep only GOAL, SHOT and TURNOVER events
pub fn key_events(events: &[MatchEvent]) -> Vec<MatchEvent> {
    events.iter().filter(|e| e.kind().is_key()).cloned().collect()
}

/// One row of the match table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchInfo {
    pub match_id: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub competition: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_score: u32,
    #[serde(default)]
    pub away_score: u32,
}

impl MatchInfo {
    /// Selector label, e.g. `Lyon 1 - 2 Lens | 2024-03-02 | Ligue 1`
    pub fn label(&self) -> String {
        format!(
            "{} {} - {} {} | {} | {}",
            self.home_team,
            self.home_score,
            self.away_score,
            self.away_team,
            self.date,
            self.competition
        )
    }

    pub fn score(&self) -> String {
        format!("{} - {}", self.home_score, self.away_score)
    }
}

/// Headline numbers shown on the dashboard for one match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchOverview {
    pub label: String,
    pub score: String,
    pub event_count: usize,
    pub goal_count: usize,
}

impl MatchOverview {
    pub fn new(info: &MatchInfo, events: &[MatchEvent]) -> Self {
        // The dashboard counts goals on the stored type as-is.
        let goal_count = events.iter().filter(|e| e.event_type == "GOAL").count();

        Self {
            label: info.label(),
            score: info.score(),
            event_count: events.len(),
            goal_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_is_case_insensitive() {
        assert_eq!(EventKind::classify("goal"), EventKind::Goal);
        assert_eq!(EventKind::classify("Shot"), EventKind::Shot);
        assert_eq!(EventKind::classify("TURNOVER"), EventKind::Turnover);
        assert_eq!(EventKind::classify("PASS"), EventKind::Other);
        assert_eq!(EventKind::classify(""), EventKind::Other);
    }

    #[test]
    fn test_phase_classification() {
        assert_eq!(Phase::classify("Transition"), Phase::Transition);
        assert_eq!(Phase::classify("set-piece"), Phase::SetPiece);
        assert_eq!(Phase::classify("BUILD-UP"), Phase::BuildUp);
        assert_eq!(Phase::classify(" transition"), Phase::Other);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let event: MatchEvent = serde_json::from_str(r#"{"type": "GOAL"}"#).unwrap();

        assert_eq!(event.minute, 0);
        assert_eq!(event.x, 50.0);
        assert_eq!(event.y, 50.0);
        assert_eq!(event.phase, "");
        assert_eq!(event.kind(), EventKind::Goal);
    }

    #[test]
    fn test_timeline_label_and_position() {
        let event = MatchEvent::new(1, "TURNOVER")
            .with_time(67, 5)
            .with_actor("Lyon", "Dupont");

        assert_eq!(event.timeline_label(), "67:05 • Lyon • TURNOVER • Dupont");
        assert!((event.timeline_position() - (67.0 + 5.0 / 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_sort_and_key_events() {
        let mut events = vec![
            MatchEvent::new(1, "SHOT").with_time(30, 10),
            MatchEvent::new(1, "PASS").with_time(12, 0),
            MatchEvent::new(1, "GOAL").with_time(30, 2),
        ];
        sort_chronologically(&mut events);

        let minutes: Vec<_> = events.iter().map(|e| (e.minute, e.second)).collect();
        assert_eq!(minutes, vec![(12, 0), (30, 2), (30, 10)]);

        let keys = key_events(&events);
        assert_eq!(keys.len(), 2);
        assert!(keys.iter().all(|e| e.kind() != EventKind::Other));
    }

    #[test]
    fn test_match_label_and_overview() {
        let info = MatchInfo {
            match_id: 3,
            date: "2024-03-02".to_string(),
            competition: "Ligue 1".to_string(),
            home_team: "Lyon".to_string(),
            away_team: "Lens".to_string(),
            home_score: 1,
            away_score: 2,
        };
        assert_eq!(info.label(), "Lyon 1 - 2 Lens | 2024-03-02 | Ligue 1");

        let events = vec![
            MatchEvent::new(3, "GOAL"),
            MatchEvent::new(3, "goal"),
            MatchEvent::new(3, "SHOT"),
        ];
        let overview = MatchOverview::new(&info, &events);
        assert_eq!(overview.score, "1 - 2");
        assert_eq!(overview.event_count, 3);
        assert_eq!(overview.goal_count, 1);
    }
}
