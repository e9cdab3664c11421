//! Integration tests for the multi-tournament summary.

mod common;

use bracket_engine::{
    apply_result, champion, finalize, generate_with, summarize_history, Participant, Tournament,
};
use common::{named, KeepOrder};

/// Play a four-player bracket to completion. The first slot wins every match unless `upset`.
fn completed(roster: &[Participant], upset: bool) -> Tournament {
    let scores = if upset { [0, 2] } else { [2, 0] };
    let mut t = generate_with(roster, &mut KeepOrder).unwrap();
    for id in [t.rounds[0].matches[0].id, t.rounds[0].matches[1].id] {
        t = apply_result(&t, id, scores).unwrap();
    }
    let final_id = t.final_match().unwrap().id;
    t = apply_result(&t, final_id, scores).unwrap();
    let winner = champion(&t).unwrap().id;
    finalize(&t, winner).unwrap()
}

#[test]
fn empty_history() {
    let stats = summarize_history(&[]);
    assert_eq!(stats.total_tournaments, 0);
    assert_eq!(stats.average_goals_per_match, 0.0);
    assert!(stats.top_player.is_none());
}

#[test]
fn counts_completed_and_goals() {
    let roster = named(&["A", "B", "C", "D"]);
    let done = completed(&roster, false);
    let ongoing = generate_with(&roster, &mut KeepOrder).unwrap();
    let ongoing = apply_result(&ongoing, ongoing.rounds[0].matches[0].id, [4, 3]).unwrap();

    let stats = summarize_history(&[done, ongoing]);
    assert_eq!(stats.total_tournaments, 2);
    assert_eq!(stats.completed_tournaments, 1);
    assert_eq!(stats.scored_matches, 4);
    assert_eq!(stats.total_goals, 2 * 3 + 7);
    assert_eq!(stats.average_goals_per_match, 13.0 / 4.0);
}

#[test]
fn top_player_has_most_wins() {
    let roster = named(&["A", "B", "C", "D"]);
    let history = vec![
        completed(&roster, false),
        completed(&roster, true),
        completed(&roster, true),
    ];
    let stats = summarize_history(&history);
    let top = stats.top_player.unwrap();
    assert_eq!(top.participant, roster[3]);
    assert_eq!(top.tournament_wins, 2);
    assert_eq!(top.tournaments_played, 3);
}

#[test]
fn tie_goes_to_earliest_winner() {
    let roster = named(&["A", "B", "C", "D"]);
    let history = vec![completed(&roster, false), completed(&roster, true)];
    let top = summarize_history(&history).top_player.unwrap();
    assert_eq!(top.participant, roster[0]);
    assert_eq!(top.tournament_wins, 1);
}

#[test]
fn goal_totals_do_not_overflow() {
    let roster = named(&["A", "B", "C", "D"]);
    let mut t = generate_with(&roster, &mut KeepOrder).unwrap();
    for id in [t.rounds[0].matches[0].id, t.rounds[0].matches[1].id] {
        t = apply_result(&t, id, [u32::MAX, 1]).unwrap();
    }
    let stats = summarize_history(&[t.clone(), t]);
    assert_eq!(stats.scored_matches, 4);
    assert_eq!(stats.total_goals, 4 * (u64::from(u32::MAX) + 1));
}
