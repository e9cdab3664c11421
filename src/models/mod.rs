//! Data structures for the bracket: participants, matches, rounds, tournament state.

mod game;
mod participant;
mod tournament;

pub use game::{BracketMatch, MatchId, Slot};
pub use participant::{Participant, ParticipantId};
pub use tournament::{
    MatchPosition, Round, Tournament, TournamentError, TournamentId, TournamentStatus,
};
