//! Summary statistics over many tournaments (history dashboard).

use crate::models::{Participant, ParticipantId, Tournament};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Participant with the most tournament wins.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TopPlayer {
    pub participant: Participant,
    pub tournament_wins: u32,
    pub tournaments_played: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_tournaments: usize,
    pub completed_tournaments: usize,
    pub scored_matches: usize,
    pub total_goals: u64,
    pub average_goals_per_match: f64,
    pub top_player: Option<TopPlayer>,
}

/// Summarize a list of tournaments.
///
/// Wins count only completed tournaments. On equal wins the participant who won first (in list
/// order) is the top player.
pub fn summarize_history(tournaments: &[Tournament]) -> HistoryStats {
    let mut stats = HistoryStats {
        total_tournaments: tournaments.len(),
        ..HistoryStats::default()
    };
    let mut played: HashMap<ParticipantId, u32> = HashMap::new();
    let mut wins: Vec<(Participant, u32)> = Vec::new();

    for t in tournaments {
        if t.is_completed() {
            stats.completed_tournaments += 1;
            if let Some(winner) = &t.winner {
                match wins.iter_mut().find(|(p, _)| p.id == winner.id) {
                    Some((_, count)) => *count += 1,
                    None => wins.push((winner.clone(), 1)),
                }
            }
        }

        for p in t.participants() {
            *played.entry(p.id).or_default() += 1;
        }

        for m in t.matches().filter(|m| m.scores.is_some()) {
            stats.scored_matches += 1;
            stats.total_goals += m.goals();
        }
    }

    if stats.scored_matches > 0 {
        stats.average_goals_per_match = stats.total_goals as f64 / stats.scored_matches as f64;
    }

    let mut best: Option<&(Participant, u32)> = None;
    for entry in &wins {
        if best.map_or(true, |(_, most)| entry.1 > *most) {
            best = Some(entry);
        }
    }
    stats.top_player = best.map(|(participant, tournament_wins)| TopPlayer {
        participant: participant.clone(),
        tournament_wins: *tournament_wins,
        tournaments_played: played.get(&participant.id).copied().unwrap_or(0),
    });

    stats
}
