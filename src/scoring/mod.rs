// Scoring module - per-game heuristics and the recency-weighted player score

pub mod engine;
pub mod game_score;
pub mod types;


pub use engine::ScoreEngine;
pub use game_score::{calc_game_score, rank_of, DEFAULT_SCORE};
pub use types::{
    GameRecord, Kda, ParticipantIdentity, ParticipantStats, QueueKind, ScoreBreakdown, ScoreReason,
    Summoner, SummonerId, UserScoreResult,
};
