//! Single-elimination bracket engine: library with models and progression logic.

pub mod config;
pub mod logic;
pub mod models;
pub mod records;
pub mod roster;
pub mod store;

pub use logic::{
    apply_result, champion, compute_progress, finalize, finalize_at, find_match, find_next_match,
    generate, generate_with, is_ready_to_finalize, playable_matches, resolve, round_count,
    round_sizes, summarize_history, validate_participant_count, HistoryStats, SeededShuffle,
    Shuffle, ThreadRngShuffle, TopPlayer, TournamentProgress,
};
pub use models::{
    BracketMatch, MatchId, MatchPosition, Participant, ParticipantId, Round, Slot, Tournament,
    TournamentError, TournamentId, TournamentStatus,
};
