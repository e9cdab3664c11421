//! Tournament, Round, and TournamentStatus.

use crate::models::game::{BracketMatch, MatchId};
use crate::models::participant::{Participant, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Equal scores submitted; single elimination has no draws.
    InvalidOutcome,
    /// Match id is not part of this tournament's rounds.
    MatchNotFound(MatchId),
    /// Match has an empty slot and cannot be scored.
    MatchNotReady(MatchId),
    /// Match already has a result.
    MatchAlreadyResolved(MatchId),
    /// Finalize attempted before the final match is resolved.
    NotReady,
    /// Declared winner is not the participant who won the final.
    WinnerMismatch {
        declared: ParticipantId,
        resolved: ParticipantId,
    },
    /// Tournament is completed; no further changes allowed.
    AlreadyCompleted,
    /// Bracket generation needs at least one participant.
    NoParticipants,
    /// Participant count outside the accepted range.
    ParticipantCount { min: usize, max: usize, actual: usize },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidOutcome => write!(f, "Scores cannot be equal: a match needs a winner"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::MatchNotReady(_) => write!(f, "Match is waiting for participants"),
            TournamentError::MatchAlreadyResolved(_) => write!(f, "Match already has a result"),
            TournamentError::NotReady => write!(f, "The final match has not been played yet"),
            TournamentError::WinnerMismatch { .. } => {
                write!(f, "Declared winner does not match the winner of the final")
            }
            TournamentError::AlreadyCompleted => write!(f, "Tournament is already completed"),
            TournamentError::NoParticipants => write!(f, "Need at least one participant"),
            TournamentError::ParticipantCount { min, max, actual } => {
                write!(f, "Need between {} and {} participants (got {})", min, max, actual)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Ongoing,
    /// Terminal: winner declared, no further results accepted.
    Completed,
}

/// Position of a match in the bracket: round index and index within the round (both 0-based).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct MatchPosition {
    pub round: usize,
    pub index: usize,
}

/// One round of the bracket. Match `i` feeds match `i / 2` of the next round.
///
/// Matches are shared between successive tournament values; an update only replaces the
/// matches it touches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub matches: Vec<Arc<BracketMatch>>,
}

impl Round {
    pub fn new(matches: Vec<BracketMatch>) -> Self {
        Self {
            matches: matches.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Full tournament state: bracket rounds plus terminal fields.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub status: TournamentStatus,
    pub rounds: Vec<Round>,
    /// Set only once the tournament is completed.
    pub winner: Option<Participant>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create an ongoing tournament over the given rounds.
    pub fn new(rounds: Vec<Round>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: TournamentStatus::Ongoing,
            rounds,
            winner: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TournamentStatus::Completed
    }

    /// Locate a match by id.
    pub fn position_of(&self, match_id: MatchId) -> Option<MatchPosition> {
        self.rounds.iter().enumerate().find_map(|(round, r)| {
            r.matches
                .iter()
                .position(|m| m.id == match_id)
                .map(|index| MatchPosition { round, index })
        })
    }

    pub fn match_at(&self, pos: MatchPosition) -> Option<&BracketMatch> {
        self.rounds
            .get(pos.round)
            .and_then(|r| r.matches.get(pos.index))
            .map(Arc::as_ref)
    }

    /// The single match of the last round.
    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.rounds
            .last()
            .and_then(|r| r.matches.first())
            .map(Arc::as_ref)
    }

    /// Number of matches in the previous round that feed the match at `pos` (0 for round 1).
    pub fn feeder_count(&self, pos: MatchPosition) -> usize {
        if pos.round == 0 {
            return 0;
        }
        let previous = self.rounds.get(pos.round - 1).map_or(0, Round::len);
        (2 * pos.index..2 * pos.index + 2)
            .filter(|&i| i < previous)
            .count()
    }

    /// Participants in round 1 (the entrants), in bracket order.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.rounds
            .first()
            .into_iter()
            .flat_map(|r| r.matches.iter())
            .flat_map(|m| m.slots.iter().flatten())
    }

    pub fn matches(&self) -> impl Iterator<Item = &BracketMatch> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .map(Arc::as_ref)
    }
}
