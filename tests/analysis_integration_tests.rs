use tacticore::analysis::patterns::{LAST_THIRD_INSIGHT, TRANSITION_INSIGHT, TURNOVER_INSIGHT};
use tacticore::analysis::PatternZone;
use tacticore::{
    analyze_key_event, compute_match_patterns, generate_tactical_narrative, Confidence,
    EventKind, EventStore, PriorityLevel,
};
use tempfile::TempDir;

const DEMO_EVENTS: &str = include_str!("../data/demo_events.csv");
const DEMO_MATCHES: &str = include_str!("../data/demo_matches.csv");

fn demo_store() -> (TempDir, EventStore) {
    let temp_dir = TempDir::new().unwrap();
    let events_path = temp_dir.path().join("events.csv");
    let matches_path = temp_dir.path().join("matches.csv");
    std::fs::write(&events_path, DEMO_EVENTS).unwrap();
    std::fs::write(&matches_path, DEMO_MATCHES).unwrap();

    let store = EventStore::load(&events_path, &matches_path).unwrap();
    (temp_dir, store)
}

#[test]
fn test_demo_tables_load() {
    let (_dir, store) = demo_store();

    assert_eq!(store.matches().len(), 3);
    assert_eq!(store.total_events(), 18);
    assert_eq!(store.events_for_match(1).len(), 9);
    assert_eq!(
        store.match_info(1).unwrap().label(),
        "Olympique Lyonnais 1 - 2 RC Lens | 2024-03-02 | Ligue 1"
    );
}

#[test]
fn test_late_goal_after_turnover() {
    let (_dir, store) = demo_store();
    let events = store.events_for_match(1);
    let goal = store
        .key_events(1)
        .into_iter()
        .find(|e| e.kind() == EventKind::Goal && e.minute == 70)
        .unwrap();

    let result = analyze_key_event(&goal, events);

    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(
        (result.individual, result.collective, result.tactical),
        (27, 41, 32)
    );
    assert!(result.explanation.contains("recent turnover"));
    assert_eq!(result.recommendations.len(), 4);

    let narrative = generate_tactical_narrative(&result, &goal);
    assert!(narrative.contains("collective coordination"));
}

#[test]
fn test_every_key_event_sums_to_100() {
    let (_dir, store) = demo_store();

    for info in store.matches() {
        let events = store.events_for_match(info.match_id);
        for event in store.key_events(info.match_id) {
            let result = analyze_key_event(&event, events);
            assert_eq!(
                result.individual + result.collective + result.tactical,
                100,
                "{}",
                event.timeline_label()
            );
            assert!(!result.recommendations.is_empty());
        }
    }
}

#[test]
fn test_patterns_of_an_open_match() {
    let (_dir, store) = demo_store();
    let summary = compute_match_patterns(store.events_for_match(1));

    assert_eq!(summary.total_events, 9);
    assert_eq!(summary.total_goals, 3);
    assert_eq!(summary.total_shots, 3);
    assert_eq!(summary.total_turnovers, 3);
    assert_eq!(summary.phase_distribution.get("transition"), Some(&4));
    assert_eq!(summary.phase_distribution.get("Transition"), Some(&1));
    assert_eq!(summary.zone_count(PatternZone::LastThird), 5);
    assert_eq!(summary.transition_risk_ratio, 0.56);
    assert_eq!(summary.priority_level, PriorityLevel::High);
    assert_eq!(
        summary.insights,
        vec![TRANSITION_INSIGHT, LAST_THIRD_INSIGHT, TURNOVER_INSIGHT]
    );
}

#[test]
fn test_patterns_of_a_closed_match() {
    let (_dir, store) = demo_store();
    let summary = compute_match_patterns(store.events_for_match(2));

    assert_eq!(summary.total_events, 4);
    assert_eq!(summary.transition_risk_ratio, 0.25);
    assert_eq!(summary.priority_level, PriorityLevel::Low);
    assert_eq!(summary.insights, vec![LAST_THIRD_INSIGHT]);
}

#[test]
fn test_summary_serializes_zone_labels() {
    let (_dir, store) = demo_store();
    let summary = compute_match_patterns(store.events_for_match(1));
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["zone_distribution"]["last third"], 5);
    assert_eq!(json["priority_level"], "High");
}
