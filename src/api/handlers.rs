//! API request handlers

use serde_json::Value;

use super::models::{AnalyzeRequest, AnalyzeResponse, MatchEvents, MatchSummary, TimelineEvent};
use crate::analysis::{analyze_key_event, compute_match_patterns, generate_tactical_narrative, PatternSummary};
use crate::error::Result;
use crate::events::EventStore;

/// Handle health check requests
pub fn health_check() -> Value {
    serde_json::json!({
        "status": "healthy",
        "service": "tacticore",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}

/// Handle match listing requests
pub fn list_matches(store: &EventStore) -> Vec<MatchSummary> {
    store
        .matches()
        .iter()
        .map(|info| {
            let overview = crate::events::MatchOverview::new(info, store.events_for_match(info.match_id));
            MatchSummary {
                match_id: info.match_id,
                label: overview.label,
                score: overview.score,
                event_count: overview.event_count,
                goal_count: overview.goal_count,
            }
        })
        .collect()
}

/// Handle match timeline requests
pub fn match_events(store: &EventStore, match_id: i64) -> Result<MatchEvents> {
    let info = store.match_info(match_id)?.clone();
    let events = store
        .events_for_match(match_id)
        .iter()
        .cloned()
        .map(TimelineEvent::from)
        .collect();

    Ok(MatchEvents { info, events })
}

/// Handle pattern summary requests
pub fn match_patterns(store: &EventStore, match_id: i64) -> Result<PatternSummary> {
    store.match_info(match_id)?;
    Ok(compute_match_patterns(store.events_for_match(match_id)))
}

/// Handle event analysis requests
pub fn analyze_event(store: &EventStore, request: AnalyzeRequest) -> Result<AnalyzeResponse> {
    let event = request.event;
    store.match_info(event.match_id)?;

    let result = analyze_key_event(&event, store.events_for_match(event.match_id));
    let narrative = generate_tactical_narrative(&result, &event);

    Ok(AnalyzeResponse { result, narrative })
}
