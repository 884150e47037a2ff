//! Error types for taxon resolution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxonError {
    /// The search returned no candidates at all.
    #[error("Nothing found")]
    NoCandidates,

    /// Candidates were found but none scored high enough. `exact` records
    /// whether quoted phrases raised the bar.
    #[error("{}", no_match_reason(.exact))]
    NoAcceptableMatch { exact: bool },

    /// The subject asks only for ranks above its resolved ancestor.
    #[error("Child ranks must be below ancestor rank: {rank}")]
    RankIncompatibility { rank: String },

    #[error("taxon search failed: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid match pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid taxon record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

fn no_match_reason(exact: &bool) -> &'static str {
    if *exact {
        "No exact match"
    } else {
        "No acceptable match"
    }
}

impl TaxonError {
    /// Wrap an error raised by a [`TaxonSearch`](crate::TaxonSearch)
    /// implementation.
    pub fn search<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TaxonError::Search(Box::new(error))
    }
}
