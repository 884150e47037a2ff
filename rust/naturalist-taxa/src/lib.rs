//! Resolves the taxon part of a compiled query to a single taxon.
//!
//! A [`TaxonSearch`] supplies candidates in relevance order. The
//! [`Matcher`] scores each candidate by an ordered list of rules and picks
//! the best one, refusing weak matches rather than guessing:
//!
//! | score | when |
//! |------:|------|
//! | -1    | the candidate is not under the requested ancestor |
//! | 300   | the query's code equals the matched term |
//! | 210   | a quoted phrase matches the name or common name |
//! | 200   | a quoted phrase matches the matched term |
//! | 120   | the whole query matches the name or common name (id lookups) |
//! | 110   | the whole query matches the matched term (id lookups) |
//! | 100   | otherwise |
//!
//! For `x in y` queries the [`Resolver`] resolves `y` first, checks that
//! `x`'s requested ranks can lie below it and only then searches for `x`.

pub mod error;
pub mod matcher;
pub mod record;
pub mod resolve;
pub mod score;
pub mod search;

pub use error::TaxonError;
pub use matcher::{Candidate, Matcher, RULES, match_taxon};
pub use record::TaxonRecord;
pub use resolve::{Resolver, check_rank_compatibility};
pub use score::{MatchScore, NameMatch};
pub use search::{CandidateList, TaxonSearch, TaxonSearchRequest};
