//! Match scores and per-field match outcomes.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::record::TaxonRecord;

/// How well a candidate fits a query. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MatchScore(i32);

impl MatchScore {
    /// Outside the requested ancestor. Never selected.
    pub const REJECTED: MatchScore = MatchScore(-1);
    /// The query's code equals the matched term.
    pub const CODE: MatchScore = MatchScore(300);
    /// A quoted phrase matches the name or common name.
    pub const PHRASE_NAME: MatchScore = MatchScore(210);
    /// A quoted phrase matches the matched term.
    pub const PHRASE_TERM: MatchScore = MatchScore(200);
    /// The whole query matches the name or common name.
    pub const WHOLE_NAME: MatchScore = MatchScore(120);
    /// The whole query matches the matched term.
    pub const WHOLE_TERM: MatchScore = MatchScore(110);
    /// Nothing better; search order decides.
    pub const DEFAULT: MatchScore = MatchScore(100);

    pub fn value(self) -> i32 {
        self.0
    }

    /// Whether a best candidate with this score may be returned. Queries
    /// with quoted phrases need a phrase level score.
    pub fn is_acceptable(self, has_phrases: bool) -> bool {
        self.0 >= 0 && (!has_phrases || self >= MatchScore::PHRASE_TERM)
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which fields of one record a pattern matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameMatch {
    pub term: bool,
    pub name: bool,
    pub common: bool,
}

impl NameMatch {
    pub const NONE: NameMatch = NameMatch {
        term: false,
        name: false,
        common: false,
    };

    pub fn of(record: &TaxonRecord, pattern: &Regex) -> Self {
        NameMatch {
            term: record.term.as_deref().is_some_and(|term| pattern.is_match(term)),
            name: pattern.is_match(&record.name),
            common: record
                .common
                .as_deref()
                .is_some_and(|common| pattern.is_match(common)),
        }
    }

    /// Field-wise "or".
    pub fn union(self, other: NameMatch) -> Self {
        NameMatch {
            term: self.term || other.term,
            name: self.name || other.name,
            common: self.common || other.common,
        }
    }

    /// The scientific or common name matched.
    pub fn names(self) -> bool {
        self.name || self.common
    }
}
