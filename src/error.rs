//! Error types.
//!
//! `Conflict` is the placement engine's control-flow signal: every variant is
//! recoverable by trying another group. `DrawError` covers everything outside
//! the engine (roster files, reports, CLI arguments).

use thiserror::Error;

/// Why a team cannot go into a candidate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Conflict {
    #[error("a team from the same region is already in this group")]
    SameRegion,

    #[error("a team from the same pool is already in this group")]
    SamePool,

    #[error("placing here leaves a later team without a valid group")]
    FutureRegion,
}

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("failed to parse roster file {path}: {message}")]
    RosterParse { path: String, message: String },

    #[error("unknown team name: '{name}'{suggestion}")]
    UnknownTeam { name: String, suggestion: String },

    #[error("unknown roster preset '{0}' (available: worlds-2020, worlds-2020-play-in)")]
    UnknownPreset(String),

    #[error("invalid draw for pool {pool}: {message}")]
    InvalidDraw { pool: u8, message: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DrawResult<T> = Result<T, DrawError>;
