//! Pitch zones derived from the x coordinate.
//!
//! Both the responsibility scorer and the pattern aggregator split the pitch
//! into the same four bands but display them with different wording. The
//! boundaries live here once; each component gets its own label set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the last third
pub const LAST_THIRD_MIN_X: f64 = 80.0;

/// Lower bound of the offensive midfield band
pub const OFFENSIVE_MIDFIELD_MIN_X: f64 = 55.0;

/// Lower bound of the midfield band
pub const MIDFIELD_MIN_X: f64 = 35.0;

/// One of the four bands of the pitch, independent of wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldBand {
    DefensiveThird,
    Midfield,
    OffensiveMidfield,
    LastThird,
}

impl FieldBand {
    pub fn from_x(x: f64) -> Self {
        if x >= LAST_THIRD_MIN_X {
            FieldBand::LastThird
        } else if x >= OFFENSIVE_MIDFIELD_MIN_X {
            FieldBand::OffensiveMidfield
        } else if x >= MIDFIELD_MIN_X {
            FieldBand::Midfield
        } else {
            FieldBand::DefensiveThird
        }
    }
}

/// Zone wording used in responsibility explanations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScorerZone {
    #[serde(rename = "finishing zone (last third)")]
    FinishingZone,
    #[serde(rename = "offensive midfield (zone 14 and flanks)")]
    OffensiveMidfield,
    #[serde(rename = "midfield")]
    Midfield,
    #[serde(rename = "defensive third")]
    DefensiveThird,
}

impl ScorerZone {
    pub fn from_x(x: f64) -> Self {
        match FieldBand::from_x(x) {
            FieldBand::LastThird => ScorerZone::FinishingZone,
            FieldBand::OffensiveMidfield => ScorerZone::OffensiveMidfield,
            FieldBand::Midfield => ScorerZone::Midfield,
            FieldBand::DefensiveThird => ScorerZone::DefensiveThird,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScorerZone::FinishingZone => "finishing zone (last third)",
            ScorerZone::OffensiveMidfield => "offensive midfield (zone 14 and flanks)",
            ScorerZone::Midfield => "midfield",
            ScorerZone::DefensiveThird => "defensive third",
        }
    }
}

impl fmt::Display for ScorerZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Zone wording used in the match pattern distribution.
///
/// Variant order follows the pitch from own goal to opponent goal, which is
/// also the iteration order of the distribution map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternZone {
    #[serde(rename = "defensive third")]
    DefensiveThird,
    #[serde(rename = "midfield")]
    Midfield,
    #[serde(rename = "offensive midfield")]
    OffensiveMidfield,
    #[serde(rename = "last third")]
    LastThird,
}

impl PatternZone {
    pub fn from_x(x: f64) -> Self {
        match FieldBand::from_x(x) {
            FieldBand::LastThird => PatternZone::LastThird,
            FieldBand::OffensiveMidfield => PatternZone::OffensiveMidfield,
            FieldBand::Midfield => PatternZone::Midfield,
            FieldBand::DefensiveThird => PatternZone::DefensiveThird,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PatternZone::LastThird => "last third",
            PatternZone::OffensiveMidfield => "offensive midfield",
            PatternZone::Midfield => "midfield",
            PatternZone::DefensiveThird => "defensive third",
        }
    }
}

impl fmt::Display for PatternZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
