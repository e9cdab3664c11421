//! Flat rows for the persistence collaborator: one tournament row, one row per match.

use crate::models::{
    BracketMatch, MatchId, ParticipantId, Slot, Tournament, TournamentId, TournamentStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub id: TournamentId,
    pub status: TournamentStatus,
    pub player_count: usize,
    pub winner_id: Option<ParticipantId>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// One match row. `round` and `match_number` are 1-based.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round: usize,
    pub match_number: usize,
    pub player1_id: Option<ParticipantId>,
    pub player2_id: Option<ParticipantId>,
    pub player1_score: Option<u32>,
    pub player2_score: Option<u32>,
    pub winner_id: Option<ParticipantId>,
    pub next_match_id: Option<MatchId>,
}

impl MatchRecord {
    fn from_match(tournament_id: TournamentId, round: usize, index: usize, m: &BracketMatch) -> Self {
        Self {
            id: m.id,
            tournament_id,
            round: round + 1,
            match_number: index + 1,
            player1_id: m.participant(Slot::First).map(|p| p.id),
            player2_id: m.participant(Slot::Second).map(|p| p.id),
            player1_score: m.scores.map(|s| s[0]),
            player2_score: m.scores.map(|s| s[1]),
            winner_id: m.winning_participant().map(|p| p.id),
            next_match_id: m.next_match_id,
        }
    }
}

pub fn tournament_record(tournament: &Tournament) -> TournamentRecord {
    TournamentRecord {
        id: tournament.id,
        status: tournament.status,
        player_count: tournament.participants().count(),
        winner_id: tournament.winner.as_ref().map(|p| p.id),
        completed_at: tournament.completed_at,
    }
}

/// Every match of the bracket, round by round.
pub fn match_records(tournament: &Tournament) -> Vec<MatchRecord> {
    tournament
        .rounds
        .iter()
        .enumerate()
        .flat_map(|(r, round)| {
            round
                .matches
                .iter()
                .enumerate()
                .map(move |(i, m)| MatchRecord::from_match(tournament.id, r, i, m))
        })
        .collect()
}

/// Rows that differ between two values of the same tournament.
///
/// Matches still shared between `previous` and `next` are skipped without comparing contents.
pub fn changed_matches(previous: &Tournament, next: &Tournament) -> Vec<MatchRecord> {
    let mut changed = Vec::new();
    for (r, round) in next.rounds.iter().enumerate() {
        for (i, m) in round.matches.iter().enumerate() {
            let before = previous.rounds.get(r).and_then(|pr| pr.matches.get(i));
            let unchanged = before.is_some_and(|b| Arc::ptr_eq(b, m) || b == m);
            if !unchanged {
                changed.push(MatchRecord::from_match(next.id, r, i, m));
            }
        }
    }
    changed
}
