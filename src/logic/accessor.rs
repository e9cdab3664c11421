//! Read-side queries over a tournament value.

use crate::models::{BracketMatch, MatchId, MatchPosition, Participant, Tournament, TournamentStatus};
use serde::{Deserialize, Serialize};

/// Aggregate numbers for the bracket view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentProgress {
    pub total_matches: usize,
    /// Matches with a played result (byes and walkovers excluded).
    pub resolved_matches: usize,
    /// Matches resolved without being played.
    pub byes: usize,
    pub total_goals: u64,
    /// 0.0 when nothing has been played.
    pub average_goals_per_resolved_match: f64,
}

pub fn find_match(tournament: &Tournament, match_id: MatchId) -> Option<&BracketMatch> {
    tournament
        .position_of(match_id)
        .and_then(|pos| tournament.match_at(pos))
}

/// Match fed by the match at (`round_index`, `match_index`); None from the final.
pub fn find_next_match(
    tournament: &Tournament,
    round_index: usize,
    match_index: usize,
) -> Option<&BracketMatch> {
    tournament.match_at(MatchPosition {
        round: round_index,
        index: match_index,
    })?;
    tournament.match_at(MatchPosition {
        round: round_index + 1,
        index: match_index / 2,
    })
}

pub fn compute_progress(tournament: &Tournament) -> TournamentProgress {
    let mut progress = TournamentProgress::default();
    for m in tournament.matches() {
        progress.total_matches += 1;
        if m.scores.is_some() {
            progress.resolved_matches += 1;
            progress.total_goals += m.goals();
        } else if m.is_bye() {
            progress.byes += 1;
        }
    }
    if progress.resolved_matches > 0 {
        progress.average_goals_per_resolved_match =
            progress.total_goals as f64 / progress.resolved_matches as f64;
    }
    progress
}

/// True once the final has a winner and the tournament is still ongoing.
pub fn is_ready_to_finalize(tournament: &Tournament) -> bool {
    tournament.status == TournamentStatus::Ongoing
        && tournament.final_match().is_some_and(BracketMatch::is_resolved)
}

/// Winner of the final, before or after finalization.
pub fn champion(tournament: &Tournament) -> Option<&Participant> {
    tournament
        .final_match()
        .and_then(BracketMatch::winning_participant)
}

/// Matches that have both participants and are waiting for a result, in round order.
pub fn playable_matches(tournament: &Tournament) -> Vec<MatchPosition> {
    if tournament.is_completed() {
        return Vec::new();
    }
    tournament
        .rounds
        .iter()
        .enumerate()
        .flat_map(|(round, r)| {
            r.matches
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_ready() && !m.is_resolved())
                .map(move |(index, _)| MatchPosition { round, index })
        })
        .collect()
}
