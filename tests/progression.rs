//! Integration tests for match resolution, winner propagation and finalization.

mod common;

use bracket_engine::{
    apply_result, champion, finalize, finalize_at, generate_with, is_ready_to_finalize,
    resolve, MatchPosition, SeededShuffle, Slot, Tournament, TournamentError, TournamentStatus,
};
use chrono::{TimeZone, Utc};
use common::{named, ordered_bracket, participants, KeepOrder};
use std::sync::Arc;

fn match_id(t: &Tournament, round: usize, index: usize) -> uuid::Uuid {
    t.match_at(MatchPosition { round, index }).unwrap().id
}

/// Score every playable match of round `r`, the first slot winning.
fn play_round(mut t: Tournament, r: usize) -> Tournament {
    let ids: Vec<_> = t.rounds[r]
        .matches
        .iter()
        .filter(|m| m.is_ready() && !m.is_resolved())
        .map(|m| m.id)
        .collect();
    for id in ids {
        assert_eq!(finalize(&t, uuid::Uuid::nil()), Err(TournamentError::NotReady));
        t = apply_result(&t, id, [2, 1]).unwrap();
    }
    t
}

#[test]
fn resolve_picks_higher_score() {
    assert_eq!(resolve([3, 1]), Ok(Slot::First));
    assert_eq!(resolve([0, 5]), Ok(Slot::Second));
    assert_eq!(resolve([3, 1]), resolve([3, 1]));
}

#[test]
fn resolve_rejects_draws() {
    assert_eq!(resolve([2, 2]), Err(TournamentError::InvalidOutcome));
    assert_eq!(resolve([0, 0]), Err(TournamentError::InvalidOutcome));
}

#[test]
fn four_player_tournament_end_to_end() {
    let roster = named(&["A", "B", "C", "D"]);
    let t = generate_with(&roster, &mut KeepOrder).unwrap();
    assert_eq!(t.rounds[0].len(), 2);

    let m1 = match_id(&t, 0, 0);
    let m2 = match_id(&t, 0, 1);
    let t = apply_result(&t, m1, [3, 1]).unwrap();
    let final_match = t.final_match().unwrap();
    assert_eq!(final_match.participant(Slot::First), Some(&roster[0]));

    assert_eq!(
        apply_result(&t, m2, [2, 2]),
        Err(TournamentError::InvalidOutcome)
    );
    assert_eq!(t.final_match().unwrap().participant(Slot::Second), None);

    let t = apply_result(&t, m2, [2, 0]).unwrap();
    let final_match = t.final_match().unwrap();
    assert!(final_match.is_ready());
    assert_eq!(final_match.participant(Slot::Second), Some(&roster[2]));
    assert!(!is_ready_to_finalize(&t));

    let t = apply_result(&t, final_match.id, [1, 4]).unwrap();
    assert!(is_ready_to_finalize(&t));
    assert_eq!(t.status, TournamentStatus::Ongoing);

    let winner = champion(&t).unwrap().clone();
    assert_eq!(winner, roster[2]);
    let done = finalize(&t, winner.id).unwrap();
    assert_eq!(done.status, TournamentStatus::Completed);
    assert_eq!(done.winner, Some(winner));
    assert!(done.completed_at.is_some());
    assert!(!is_ready_to_finalize(&done));
}

#[test]
fn apply_result_is_pure() {
    let t = ordered_bracket(8);
    let before = t.clone();
    let id = match_id(&t, 0, 3);

    let a = apply_result(&t, id, [5, 2]).unwrap();
    let b = apply_result(&t, id, [5, 2]).unwrap();
    assert_eq!(a, b);
    assert_eq!(t, before, "input must not change");
    assert!(t.match_at(MatchPosition { round: 0, index: 3 }).unwrap().scores.is_none());
}

#[test]
fn apply_result_only_replaces_touched_matches() {
    let t = ordered_bracket(8);
    let next = apply_result(&t, match_id(&t, 0, 2), [1, 0]).unwrap();
    let touched = [(0, 2), (1, 1)];
    for (r, round) in t.rounds.iter().enumerate() {
        for (i, m) in round.matches.iter().enumerate() {
            let shared = Arc::ptr_eq(m, &next.rounds[r].matches[i]);
            assert_eq!(shared, !touched.contains(&(r, i)), "round {r} match {i}");
        }
    }
}

#[test]
fn winner_goes_to_slot_by_match_index() {
    let roster = participants(8);
    let t = generate_with(&roster, &mut KeepOrder).unwrap();
    let t = apply_result(&t, match_id(&t, 0, 3), [0, 1]).unwrap();
    let dest = t.match_at(MatchPosition { round: 1, index: 1 }).unwrap();
    assert_eq!(dest.participant(Slot::Second), Some(&roster[7]));
    assert_eq!(dest.participant(Slot::First), None);
}

#[test]
fn unpopulated_match_is_not_ready() {
    let t = ordered_bracket(4);
    let final_id = t.final_match().unwrap().id;
    assert_eq!(
        apply_result(&t, final_id, [1, 0]),
        Err(TournamentError::MatchNotReady(final_id))
    );

    let t = apply_result(&t, match_id(&t, 0, 0), [1, 0]).unwrap();
    assert_eq!(
        apply_result(&t, final_id, [1, 0]),
        Err(TournamentError::MatchNotReady(final_id))
    );
}

#[test]
fn bye_cannot_be_scored() {
    let t = ordered_bracket(5);
    let bye = match_id(&t, 0, 2);
    assert_eq!(
        apply_result(&t, bye, [3, 0]),
        Err(TournamentError::MatchNotReady(bye))
    );
}

#[test]
fn unknown_match_is_not_found() {
    let t = ordered_bracket(4);
    let other = ordered_bracket(4);
    let foreign = match_id(&other, 0, 0);
    assert_eq!(
        apply_result(&t, foreign, [1, 0]),
        Err(TournamentError::MatchNotFound(foreign))
    );
}

#[test]
fn scored_match_cannot_be_rescored() {
    let t = ordered_bracket(4);
    let id = match_id(&t, 0, 0);
    let t = apply_result(&t, id, [1, 0]).unwrap();
    assert_eq!(
        apply_result(&t, id, [0, 1]),
        Err(TournamentError::MatchAlreadyResolved(id))
    );
}

#[test]
fn every_round_fills_the_next() {
    let mut shuffler = SeededShuffle::from_seed(2024);
    for n in 4..=32 {
        let mut t = generate_with(&participants(n), &mut shuffler).unwrap();
        for r in 0..t.rounds.len() {
            t = play_round(t, r);
            assert!(t.rounds[r].matches.iter().all(|m| m.is_resolved()), "n={n} round {r}");
            if r + 1 == t.rounds.len() {
                break;
            }
            for (i, m) in t.rounds[r + 1].matches.iter().enumerate() {
                let pos = MatchPosition { round: r + 1, index: i };
                match t.feeder_count(pos) {
                    2 => assert!(m.is_ready(), "n={n} round {} match {i}", r + 1),
                    _ => assert!(m.is_bye(), "n={n} round {} match {i}", r + 1),
                }
            }
        }
        assert!(is_ready_to_finalize(&t), "n={n}");
        let winner = champion(&t).unwrap().id;
        let done = finalize(&t, winner).unwrap();
        assert_eq!(done.status, TournamentStatus::Completed);
    }
}

#[test]
fn finalize_requires_resolved_final() {
    let t = ordered_bracket(4);
    let anyone = t.participants().next().unwrap().id;
    assert_eq!(finalize(&t, anyone), Err(TournamentError::NotReady));
}

#[test]
fn finalize_rejects_wrong_winner() {
    let mut t = ordered_bracket(4);
    t = play_round(t, 0);
    t = play_round(t, 1);
    let winner = champion(&t).unwrap().id;
    let loser = t
        .final_match()
        .unwrap()
        .participant(Slot::Second)
        .unwrap()
        .id;
    assert_eq!(
        finalize(&t, loser),
        Err(TournamentError::WinnerMismatch {
            declared: loser,
            resolved: winner
        })
    );
}

#[test]
fn completed_tournament_is_frozen() {
    let mut t = ordered_bracket(4);
    t = play_round(t, 0);
    t = play_round(t, 1);
    let winner = champion(&t).unwrap().id;
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap();
    let done = finalize_at(&t, winner, at).unwrap();
    assert_eq!(done.completed_at, Some(at));

    assert_eq!(finalize(&done, winner), Err(TournamentError::AlreadyCompleted));
    let first = match_id(&done, 0, 0);
    assert_eq!(
        apply_result(&done, first, [1, 0]),
        Err(TournamentError::AlreadyCompleted)
    );
}

#[test]
fn result_feeding_a_walkover_reaches_the_final() {
    let roster = participants(6);
    let t = generate_with(&roster, &mut KeepOrder).unwrap();
    let next = apply_result(&t, match_id(&t, 0, 2), [4, 1]).unwrap();

    let walkover = next.match_at(MatchPosition { round: 1, index: 1 }).unwrap();
    assert_eq!(walkover.participant(Slot::First), Some(&roster[4]));
    assert_eq!(walkover.participant(Slot::Second), None);
    assert_eq!(walkover.winner, Some(Slot::First));
    assert_eq!(walkover.scores, None);

    let final_match = next.final_match().unwrap();
    assert_eq!(final_match.participant(Slot::Second), Some(&roster[4]));
    assert_eq!(final_match.participant(Slot::First), None);
    assert!(!final_match.is_resolved());

    // Before the result the walkover and the final are untouched.
    let before = t.match_at(MatchPosition { round: 1, index: 1 }).unwrap();
    assert!(before.slots.iter().all(Option::is_none));
    assert!(!before.is_resolved());
}
