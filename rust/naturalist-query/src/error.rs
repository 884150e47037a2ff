//! Error types for the query compiler.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The text could not be split into words, e.g. an unbalanced quote.
    #[error("{0}")]
    Syntax(String),

    #[error("unrecognized flag: --{0}")]
    UnknownFlag(String),

    #[error("--{flag} expects at least {expected} value(s)")]
    MissingValue { flag: String, expected: usize },

    #[error("unknown rank: {0}")]
    UnknownRank(String),

    /// The subject asks only for ranks above the ancestor's rank.
    #[error("Child ranks must be below ancestor rank: {ancestor}")]
    IncompatibleRanks { ancestor: String },

    #[error("invalid macro definitions: {0}")]
    InvalidMacros(#[from] serde_json::Error),
}
