//! Heuristic match analysis: per-event responsibility scoring and
//! match-level pattern aggregation.
//!
//! Both components are pure functions over already-loaded events.

pub mod narrative;
pub mod patterns;
pub mod responsibility;
pub mod zones;

pub use narrative::{generate_tactical_narrative, Dominance};
pub use patterns::{compute_match_patterns, PatternSummary, PriorityLevel};
pub use responsibility::{
    analyze_key_event, clamp_to_100, Confidence, ResponsibilityResult, ResponsibilitySplit,
};
pub use zones::{FieldBand, PatternZone, ScorerZone};
