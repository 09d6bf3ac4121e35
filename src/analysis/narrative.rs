//! Short tactical diagnosis text built from a responsibility split

use super::responsibility::ResponsibilityResult;
use crate::events::MatchEvent;

/// Which share of responsibility drives the diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    Tactical,
    Collective,
    Individual,
}

impl Dominance {
    /// Tactical must beat both others strictly; otherwise collective must beat
    /// individual strictly, and every remaining case is individual.
    pub fn of(result: &ResponsibilityResult) -> Self {
        if result.tactical > result.individual && result.tactical > result.collective {
            Dominance::Tactical
        } else if result.collective > result.individual {
            Dominance::Collective
        } else {
            Dominance::Individual
        }
    }

    fn phrase(&self) -> &'static str {
        match self {
            Dominance::Tactical => {
                "a major strategic failure. The game plan was not suited to the situation."
            }
            Dominance::Collective => {
                "a lack of collective coordination. The block was poorly aligned."
            }
            Dominance::Individual => "an individual execution error that could have been avoided.",
        }
    }
}

/// Two-paragraph markdown diagnosis for the analyzed event
pub fn generate_tactical_narrative(result: &ResponsibilityResult, event: &MatchEvent) -> String {
    let dominance = Dominance::of(result);

    format!(
        "**Tactical diagnosis:** This action ({}) at minute {} reveals {} \n\n\
         **Phase analysis:** During the {} phase, the team left too much space \
         in the zone x={}. ",
        event.event_type,
        event.minute,
        dominance.phrase(),
        event.phase,
        event.x
    )
}
