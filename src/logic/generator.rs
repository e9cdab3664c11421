//! Bracket generation: random seeding, byes, and the empty later rounds.

use crate::logic::progression;
use crate::models::{BracketMatch, MatchPosition, Participant, Round, Tournament, TournamentError};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Source of the seeding permutation. Injected so brackets can be reproduced in tests.
pub trait Shuffle {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Ambient randomness; what `generate` uses.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngShuffle;

impl Shuffle for ThreadRngShuffle {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut rand::thread_rng());
    }
}

/// Reproducible shuffle: the same seed gives the same permutation sequence.
#[derive(Clone, Debug)]
pub struct SeededShuffle {
    rng: StdRng,
}

impl SeededShuffle {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Shuffle for SeededShuffle {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Number of rounds for `n` participants: ceil(log2(n)), at least one.
pub fn round_count(n: usize) -> usize {
    let bits = (usize::BITS - n.saturating_sub(1).leading_zeros()) as usize;
    bits.max(1)
}

/// Match count of every round for `n` participants, first round first.
pub fn round_sizes(n: usize) -> Vec<usize> {
    let mut sizes = vec![n.div_ceil(2).max(1)];
    for _ in 1..round_count(n) {
        let previous = sizes[sizes.len() - 1];
        sizes.push(previous.div_ceil(2));
    }
    sizes
}

/// Generate a bracket with ambient random seeding.
pub fn generate(participants: &[Participant]) -> Result<Tournament, TournamentError> {
    generate_with(participants, &mut ThreadRngShuffle)
}

/// Generate a bracket, seeding with the given shuffle.
///
/// 1. Permute the participants.
/// 2. Pair them two at a time into round 1; an odd participant out gets a bye.
/// 3. Add empty rounds, each half the size (rounded up) of the one before, down to the final.
/// 4. Link every match to the match it feeds and advance bye winners.
pub fn generate_with<S: Shuffle>(
    participants: &[Participant],
    shuffler: &mut S,
) -> Result<Tournament, TournamentError> {
    if participants.is_empty() {
        return Err(TournamentError::NoParticipants);
    }

    let mut seeded = participants.to_vec();
    shuffler.shuffle(&mut seeded);

    let mut first_round = Vec::with_capacity(seeded.len().div_ceil(2));
    let mut remaining = seeded.into_iter();
    while let Some(first) = remaining.next() {
        first_round.push(match remaining.next() {
            Some(second) => BracketMatch::pairing(first, second),
            None => BracketMatch::bye(first),
        });
    }

    let sizes = round_sizes(participants.len());
    let mut rounds: Vec<Vec<BracketMatch>> = vec![first_round];
    for &size in &sizes[1..] {
        rounds.push((0..size).map(|_| BracketMatch::new()).collect());
    }

    for r in 0..rounds.len() - 1 {
        let next_ids: Vec<_> = rounds[r + 1].iter().map(|m| m.id).collect();
        for (i, m) in rounds[r].iter_mut().enumerate() {
            m.next_match_id = Some(next_ids[i / 2]);
        }
    }

    let byes: Vec<usize> = rounds[0]
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_bye())
        .map(|(i, _)| i)
        .collect();

    let mut tournament = Tournament::new(rounds.into_iter().map(Round::new).collect());
    for index in byes {
        progression::advance_winner(&mut tournament, MatchPosition { round: 0, index });
    }

    debug!(
        "Generated bracket {} for {} participants ({} rounds)",
        tournament.id,
        participants.len(),
        sizes.len()
    );
    Ok(tournament)
}

/// Check a participant count against the accepted range before generating.
pub fn validate_participant_count(
    count: usize,
    min: usize,
    max: usize,
) -> Result<(), TournamentError> {
    if count < min || count > max {
        return Err(TournamentError::ParticipantCount {
            min,
            max,
            actual: count,
        });
    }
    Ok(())
}
