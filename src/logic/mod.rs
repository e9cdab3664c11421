//! Bracket business logic: generation, resolution, progression, read-side queries.

mod accessor;
mod generator;
mod history;
mod progression;
mod resolver;

pub use accessor::{
    champion, compute_progress, find_match, find_next_match, is_ready_to_finalize,
    playable_matches, TournamentProgress,
};
pub use generator::{
    generate, generate_with, round_count, round_sizes, validate_participant_count, SeededShuffle,
    Shuffle, ThreadRngShuffle,
};
pub use history::{summarize_history, HistoryStats, TopPlayer};
pub use progression::{apply_result, finalize, finalize_at};
pub use resolver::resolve;
