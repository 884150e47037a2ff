//! Best-match selection among search candidates.
//!
//! Each candidate is scored by the first rule in [`RULES`] whose predicate
//! holds. The highest score wins and ties go to the earliest candidate, so
//! the search service's own relevance order breaks them.

use naturalist_query::Query;
use regex::Regex;

use crate::error::TaxonError;
use crate::record::TaxonRecord;
use crate::score::{MatchScore, NameMatch};

/// What the query's patterns matched on one candidate.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'r> {
    pub record: &'r TaxonRecord,
    /// Union over all quoted phrases.
    pub phrase: NameMatch,
    /// The whole query, only checked when the query carries a taxon id.
    pub whole: NameMatch,
}

type Rule = fn(&Matcher<'_>, &Candidate<'_>) -> bool;

fn outside_ancestor(matcher: &Matcher<'_>, candidate: &Candidate<'_>) -> bool {
    matcher
        .ancestor_id
        .is_some_and(|ancestor_id| !candidate.record.descends_from(ancestor_id))
}

fn code_matches(matcher: &Matcher<'_>, candidate: &Candidate<'_>) -> bool {
    matcher.query.code.is_some() && matcher.query.code == candidate.record.term
}

fn phrase_matches_name(_: &Matcher<'_>, candidate: &Candidate<'_>) -> bool {
    candidate.phrase.names()
}

fn phrase_matches_term(_: &Matcher<'_>, candidate: &Candidate<'_>) -> bool {
    candidate.phrase.term
}

fn whole_matches_name(_: &Matcher<'_>, candidate: &Candidate<'_>) -> bool {
    candidate.whole.names()
}

fn whole_matches_term(_: &Matcher<'_>, candidate: &Candidate<'_>) -> bool {
    candidate.whole.term
}

/// Scoring rules, highest priority first. A candidate no rule matches
/// scores [`MatchScore::DEFAULT`].
pub const RULES: [(Rule, MatchScore); 6] = [
    (outside_ancestor, MatchScore::REJECTED),
    (code_matches, MatchScore::CODE),
    (phrase_matches_name, MatchScore::PHRASE_NAME),
    (phrase_matches_term, MatchScore::PHRASE_TERM),
    (whole_matches_name, MatchScore::WHOLE_NAME),
    (whole_matches_term, MatchScore::WHOLE_TERM),
];

/// Scores candidates against one query.
#[derive(Debug)]
pub struct Matcher<'q> {
    query: &'q Query,
    ancestor_id: Option<u64>,
    phrases: Vec<Regex>,
    whole: Option<Regex>,
}

impl<'q> Matcher<'q> {
    pub fn new(query: &'q Query, ancestor_id: Option<u64>) -> Result<Self, TaxonError> {
        let phrases = query
            .phrases
            .iter()
            .map(|phrase| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&phrase.join(" ")))))
            .collect::<Result<Vec<_>, _>>()?;
        let whole = query
            .taxon_id
            .map(|_| Regex::new(&format!("(?i)^{}$", regex::escape(&query.joined_terms()))))
            .transpose()?;

        Ok(Matcher {
            query,
            ancestor_id,
            phrases,
            whole,
        })
    }

    pub fn candidate<'r>(&self, record: &'r TaxonRecord) -> Candidate<'r> {
        let phrase = self
            .phrases
            .iter()
            .map(|pattern| NameMatch::of(record, pattern))
            .fold(NameMatch::NONE, NameMatch::union);
        let whole = self
            .whole
            .as_ref()
            .map_or(NameMatch::NONE, |pattern| NameMatch::of(record, pattern));
        Candidate {
            record,
            phrase,
            whole,
        }
    }

    pub fn score(&self, record: &TaxonRecord) -> MatchScore {
        let candidate = self.candidate(record);
        RULES
            .iter()
            .find(|(applies, _)| applies(self, &candidate))
            .map_or(MatchScore::DEFAULT, |(_, score)| *score)
    }

    /// The best acceptable candidate.
    pub fn best_match<'r>(&self, records: &'r [TaxonRecord]) -> Result<&'r TaxonRecord, TaxonError> {
        let mut best: Option<(&TaxonRecord, MatchScore)> = None;
        for record in records {
            let score = self.score(record);
            tracing::debug!(taxon = %record.name, id = record.taxon_id, %score, "scored candidate");
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((record, score));
            }
        }

        let (record, score) = best.ok_or(TaxonError::NoCandidates)?;
        let has_phrases = !self.phrases.is_empty();
        if !score.is_acceptable(has_phrases) {
            tracing::info!(taxon = %record.name, %score, "best match scored too low");
            return Err(TaxonError::NoAcceptableMatch { exact: has_phrases });
        }
        tracing::info!(taxon = %record.name, id = record.taxon_id, %score, "best match");
        Ok(record)
    }
}

/// Pick the best candidate for `query` among `records`.
pub fn match_taxon<'r>(
    query: &Query,
    records: &'r [TaxonRecord],
    ancestor_id: Option<u64>,
) -> Result<&'r TaxonRecord, TaxonError> {
    Matcher::new(query, ancestor_id)?.best_match(records)
}
