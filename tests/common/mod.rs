//! Shared helpers for the integration tests.
#![allow(dead_code)]

use bracket_engine::{generate_with, Participant, Shuffle, Tournament};

/// Leaves the participants in the order given, so brackets are predictable.
pub struct KeepOrder;

impl Shuffle for KeepOrder {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

pub fn participants(n: usize) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(format!("P{i}"))).collect()
}

pub fn named(names: &[&str]) -> Vec<Participant> {
    names.iter().map(|n| Participant::new(*n)).collect()
}

/// Bracket for `n` participants paired in order: P0 v P1, P2 v P3, ...
pub fn ordered_bracket(n: usize) -> Tournament {
    generate_with(&participants(n), &mut KeepOrder).unwrap()
}
