//! The seam to a taxon name-search service.

use std::collections::HashMap;
use std::convert::Infallible;

use naturalist_query::Query;
use serde::Serialize;

use crate::record::TaxonRecord;

/// One call to the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonSearchRequest {
    /// Fetch a taxon by id.
    ById(u64),
    /// Search by name.
    Terms {
        /// `+` followed by the space-joined terms. The leading `+` keeps
        /// the result order stable when only letter case differs.
        q: String,
        ranks: Vec<String>,
        ancestor_id: Option<u64>,
    },
}

impl TaxonSearchRequest {
    pub fn for_query(query: &Query, ancestor_id: Option<u64>) -> Self {
        match query.taxon_id {
            Some(taxon_id) => TaxonSearchRequest::ById(taxon_id),
            None => TaxonSearchRequest::Terms {
                q: format!("+{}", query.joined_terms()),
                ranks: query.ranks.clone(),
                ancestor_id,
            },
        }
    }
}

/// A taxon name-search service.
///
/// Implementations return candidates in the service's relevance order;
/// ties between equally scored candidates are broken by that order.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait TaxonSearch {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn search(&self, request: &TaxonSearchRequest) -> Result<Vec<TaxonRecord>, Self::Error>;
}

/// A search over fixed, already retrieved results.
///
/// Name searches return the default list unless results were registered
/// for that exact `q`. Id lookups scan every list.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    records: Vec<TaxonRecord>,
    by_query: HashMap<String, Vec<TaxonRecord>>,
}

impl CandidateList {
    pub fn new(records: Vec<TaxonRecord>) -> Self {
        CandidateList {
            records,
            by_query: HashMap::new(),
        }
    }

    /// Serve `records` for searches whose terms are `terms`.
    pub fn with_results_for(mut self, terms: &Query, records: Vec<TaxonRecord>) -> Self {
        self.by_query
            .insert(format!("+{}", terms.joined_terms()), records);
        self
    }

    fn all(&self) -> impl Iterator<Item = &TaxonRecord> {
        self.records.iter().chain(self.by_query.values().flatten())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl TaxonSearch for CandidateList {
    type Error = Infallible;

    async fn search(&self, request: &TaxonSearchRequest) -> Result<Vec<TaxonRecord>, Self::Error> {
        Ok(match request {
            TaxonSearchRequest::ById(taxon_id) => self
                .all()
                .find(|record| record.taxon_id == *taxon_id)
                .cloned()
                .into_iter()
                .collect(),
            TaxonSearchRequest::Terms { q, .. } => {
                self.by_query.get(q).unwrap_or(&self.records).clone()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_builds_requests_from_queries() {
        let query = Query {
            terms: vec!["great".into(), "egret".into()],
            ranks: vec!["species".into()],
            ..Default::default()
        };
        assert_eq!(
            TaxonSearchRequest::for_query(&query, Some(3)),
            TaxonSearchRequest::Terms {
                q: "+great egret".into(),
                ranks: vec!["species".into()],
                ancestor_id: Some(3),
            }
        );

        let by_id = Query {
            terms: vec!["3".into()],
            taxon_id: Some(3),
            ..Default::default()
        };
        assert_eq!(
            TaxonSearchRequest::for_query(&by_id, None),
            TaxonSearchRequest::ById(3)
        );
    }
}
