//! CSV loading for the match table and the event table

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{sort_chronologically, MatchEvent, MatchInfo, MatchOverview, DEFAULT_COORDINATE};
use crate::error::{Result, TactiCoreError};

/// Event row as found in the file; blank or unparsable cells become `None`
#[derive(Debug, Deserialize)]
struct EventRecord {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    match_id: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    minute: Option<i32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    second: Option<i32>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    player: Option<String>,
    #[serde(rename = "type", default)]
    event_type: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    y: Option<f64>,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<EventRecord> for MatchEvent {
    fn from(record: EventRecord) -> Self {
        Self {
            match_id: record.match_id.unwrap_or_default(),
            minute: record.minute.unwrap_or_default(),
            second: record.second.unwrap_or_default(),
            team: record.team.unwrap_or_default(),
            player: record.player.unwrap_or_default(),
            event_type: record.event_type.unwrap_or_default(),
            phase: record.phase.unwrap_or_default(),
            x: record.x.unwrap_or(DEFAULT_COORDINATE),
            y: record.y.unwrap_or(DEFAULT_COORDINATE),
            description: record.description.unwrap_or_default(),
        }
    }
}

/// In-memory copy of the match and event tables
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    matches: Vec<MatchInfo>,
    events: BTreeMap<i64, Vec<MatchEvent>>,
}

impl EventStore {
    /// Load both tables from CSV files
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(events_path: P, matches_path: Q) -> Result<Self> {
        let events = read_events(std::fs::File::open(events_path.as_ref())?)?;
        let matches = read_matches(std::fs::File::open(matches_path.as_ref())?)?;

        info!(
            "📄 Loaded {} matches from {} and {} events from {}",
            matches.len(),
            matches_path.as_ref().display(),
            events.len(),
            events_path.as_ref().display()
        );

        Ok(Self::from_parts(matches, events))
    }

    /// Build a store from already-parsed rows
    pub fn from_parts(matches: Vec<MatchInfo>, events: Vec<MatchEvent>) -> Self {
        let mut by_match: BTreeMap<i64, Vec<MatchEvent>> = BTreeMap::new();
        for event in events {
            by_match.entry(event.match_id).or_default().push(event);
        }
        for match_events in by_match.values_mut() {
            sort_chronologically(match_events);
        }

        Self {
            matches,
            events: by_match,
        }
    }

    pub fn matches(&self) -> &[MatchInfo] {
        &self.matches
    }

    pub fn match_info(&self, match_id: i64) -> Result<&MatchInfo> {
        self.matches
            .iter()
            .find(|m| m.match_id == match_id)
            .ok_or(TactiCoreError::MatchNotFound(match_id))
    }

    /// All events of a match sorted by (minute, second); empty if none were recorded
    pub fn events_for_match(&self, match_id: i64) -> &[MatchEvent] {
        self.events.get(&match_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// GOAL, SHOT and TURNOVER events of a match, in timeline order
    pub fn key_events(&self, match_id: i64) -> Vec<MatchEvent> {
        super::key_events(self.events_for_match(match_id))
    }

    pub fn overview(&self, match_id: i64) -> Result<MatchOverview> {
        let info = self.match_info(match_id)?;
        Ok(MatchOverview::new(info, self.events_for_match(match_id)))
    }

    pub fn total_events(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }
}

/// Parse the event table, skipping rows the reader cannot decode
pub fn read_events<R: Read>(reader: R) -> Result<Vec<MatchEvent>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
    let mut events = Vec::new();

    for (index, row) in csv_reader.deserialize::<EventRecord>().enumerate() {
        match row {
            Ok(record) => events.push(MatchEvent::from(record)),
            Err(e) => warn!("Skipping malformed event row ({}): {}", row_location(&e, index), e),
        }
    }

    debug!("Parsed {} event rows", events.len());
    Ok(events)
}

/// Parse the match table
pub fn read_matches<R: Read>(reader: R) -> Result<Vec<MatchInfo>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut matches = Vec::new();

    for (index, row) in csv_reader.deserialize::<MatchInfo>().enumerate() {
        match row {
            Ok(info) => matches.push(info),
            Err(e) => warn!("Skipping malformed match row ({}): {}", row_location(&e, index), e),
        }
    }

    debug!("Parsed {} match rows", matches.len());
    Ok(matches)
}

/// File line of a failed row, or its record number when the reader has no position
fn row_location(error: &csv::Error, index: usize) -> String {
    match error.position() {
        Some(position) => format!("line {}", position.line()),
        None => format!("record {}", index + 1),
    }
}
