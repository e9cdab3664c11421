//! Progression: applying match results, moving winners forward, and finalizing the tournament.
//!
//! Every operation takes the current tournament by reference and returns a new value. Untouched
//! matches are shared with the input, which is never modified.

use crate::logic::resolver::resolve;
use crate::models::{
    BracketMatch, MatchId, MatchPosition, ParticipantId, Slot, Tournament, TournamentError,
    TournamentStatus,
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::sync::Arc;

/// Record `scores` for a match and advance its winner into the next round.
///
/// Fails if the tournament is completed, the match is unknown, a slot is still empty, the match
/// already has a result, or the scores are equal.
pub fn apply_result(
    tournament: &Tournament,
    match_id: MatchId,
    scores: [u32; 2],
) -> Result<Tournament, TournamentError> {
    if tournament.is_completed() {
        return Err(TournamentError::AlreadyCompleted);
    }
    let pos = tournament
        .position_of(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let current = tournament
        .match_at(pos)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if !current.is_ready() {
        return Err(TournamentError::MatchNotReady(match_id));
    }
    if current.is_resolved() {
        return Err(TournamentError::MatchAlreadyResolved(match_id));
    }
    let winner = resolve(scores)?;

    let mut next = tournament.clone();
    let m = match_mut(&mut next, pos);
    m.scores = Some(scores);
    m.winner = Some(winner);
    advance_winner(&mut next, pos);

    debug!(
        "Tournament {}: match {} (round {}, #{}) scored {}-{}",
        tournament.id,
        match_id,
        pos.round + 1,
        pos.index + 1,
        scores[0],
        scores[1]
    );
    Ok(next)
}

/// Complete the tournament, declaring the winner of the final. Completed time is now.
pub fn finalize(
    tournament: &Tournament,
    declared_winner: ParticipantId,
) -> Result<Tournament, TournamentError> {
    finalize_at(tournament, declared_winner, Utc::now())
}

/// Complete the tournament with an explicit completion time.
pub fn finalize_at(
    tournament: &Tournament,
    declared_winner: ParticipantId,
    completed_at: DateTime<Utc>,
) -> Result<Tournament, TournamentError> {
    if tournament.is_completed() {
        return Err(TournamentError::AlreadyCompleted);
    }
    let champion = tournament
        .final_match()
        .and_then(BracketMatch::winning_participant)
        .ok_or(TournamentError::NotReady)?;
    if champion.id != declared_winner {
        return Err(TournamentError::WinnerMismatch {
            declared: declared_winner,
            resolved: champion.id,
        });
    }

    let mut next = tournament.clone();
    next.status = TournamentStatus::Completed;
    next.winner = Some(champion.clone());
    next.completed_at = Some(completed_at);

    info!(
        "Tournament {} completed, winner {} ({})",
        next.id, champion.display_name, champion.id
    );
    Ok(next)
}

/// Write the winner of the match at `from` into the slot it feeds in the next round.
///
/// A destination with only one feeder (the last match after an odd-sized round) has no opponent
/// coming; it is resolved as a walkover and its winner keeps moving forward.
pub(crate) fn advance_winner(tournament: &mut Tournament, from: MatchPosition) {
    let mut pos = from;
    loop {
        let Some(winner) = tournament
            .match_at(pos)
            .and_then(BracketMatch::winning_participant)
            .cloned()
        else {
            return;
        };
        let dest = MatchPosition {
            round: pos.round + 1,
            index: pos.index / 2,
        };
        if tournament.match_at(dest).is_none() {
            return;
        }
        let walkover = tournament.feeder_count(dest) == 1;

        let m = match_mut(tournament, dest);
        m.slots[Slot::for_feeder(pos.index).index()] = Some(winner);
        if !walkover {
            return;
        }
        m.winner = Some(Slot::First);
        pos = dest;
    }
}

fn match_mut(tournament: &mut Tournament, pos: MatchPosition) -> &mut BracketMatch {
    Arc::make_mut(&mut tournament.rounds[pos.round].matches[pos.index])
}
