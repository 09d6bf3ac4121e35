/// TactiCore - match analysis for coaching staff
///
/// Loads match event tables, scores key events into individual, collective and
/// tactical responsibility, aggregates match patterns into coaching insights
/// and asks an LLM for sport-specific coaching reports.

pub mod analysis;
pub mod clips;
pub mod config;
pub mod error;
pub mod events;
pub mod llm;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for easy access
pub use crate::analysis::{
    analyze_key_event, clamp_to_100, compute_match_patterns, generate_tactical_narrative,
    Confidence, PatternSummary, PriorityLevel, ResponsibilityResult,
};
pub use crate::clips::ClipStore;
pub use crate::config::Config;
pub use crate::error::{Result, TactiCoreError};
pub use crate::events::{EventKind, EventStore, MatchEvent, MatchInfo, Phase};
pub use crate::llm::report::{CoachReportGenerator, CoachingReport, Sport, SportProfile};
pub use crate::llm::{LLMConfig, LLMProvider};
