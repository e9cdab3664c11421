//! A single bracket match and the Slot index used for its two sides.

use crate::models::participant::Participant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One of the two positions in a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    First,
    Second,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    /// Slot a match at `match_index` feeds in the following round.
    pub fn for_feeder(match_index: usize) -> Self {
        if match_index % 2 == 0 {
            Slot::First
        } else {
            Slot::Second
        }
    }

    pub fn other(self) -> Self {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// A single-elimination match.
///
/// `winner` is set together with `scores` for played matches. A bye (one occupied slot, the other
/// permanently empty) carries a winner but no scores.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub slots: [Option<Participant>; 2],
    /// None if not yet played (always None for byes).
    pub scores: Option<[u32; 2]>,
    pub winner: Option<Slot>,
    /// Match in the following round this one feeds; None for the final.
    pub next_match_id: Option<MatchId>,
}

impl BracketMatch {
    /// An unpopulated match awaiting participants.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            slots: [None, None],
            scores: None,
            winner: None,
            next_match_id: None,
        }
    }

    /// A match between two participants.
    pub fn pairing(first: Participant, second: Participant) -> Self {
        Self {
            slots: [Some(first), Some(second)],
            ..Self::new()
        }
    }

    /// A bye: the single participant advances without playing.
    pub fn bye(participant: Participant) -> Self {
        Self {
            slots: [Some(participant), None],
            winner: Some(Slot::First),
            ..Self::new()
        }
    }

    pub fn participant(&self, slot: Slot) -> Option<&Participant> {
        self.slots[slot.index()].as_ref()
    }

    /// Participant in the winning slot, if the match is resolved.
    pub fn winning_participant(&self) -> Option<&Participant> {
        self.winner.and_then(|slot| self.participant(slot))
    }

    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }

    /// Both slots populated, so the match can be scored.
    pub fn is_ready(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Resolved without a played result.
    pub fn is_bye(&self) -> bool {
        self.winner.is_some() && self.scores.is_none()
    }

    pub fn goals(&self) -> u64 {
        self.scores.map_or(0, |[a, b]| u64::from(a) + u64::from(b))
    }
}

impl Default for BracketMatch {
    fn default() -> Self {
        Self::new()
    }
}
