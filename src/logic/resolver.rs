//! Match resolution: which slot won.

use crate::models::{Slot, TournamentError};
use std::cmp::Ordering;

/// Winner of a scored match: the higher score. Equal scores are rejected, there are no draws.
pub fn resolve(scores: [u32; 2]) -> Result<Slot, TournamentError> {
    match scores[0].cmp(&scores[1]) {
        Ordering::Greater => Ok(Slot::First),
        Ordering::Less => Ok(Slot::Second),
        Ordering::Equal => Err(TournamentError::InvalidOutcome),
    }
}
