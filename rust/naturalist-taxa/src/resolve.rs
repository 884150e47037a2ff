//! Resolving queries to taxa through a [`TaxonSearch`].

use naturalist_query::{CompoundQuery, Query, ranks_at_or_below};

use crate::error::TaxonError;
use crate::matcher::match_taxon;
use crate::record::TaxonRecord;
use crate::search::{TaxonSearch, TaxonSearchRequest};

/// Fail when `child` asks only for ranks coarser than `ancestor`'s rank.
///
/// A child without explicit ranks, or an ancestor of a rank outside the
/// known ordering, always passes.
pub fn check_rank_compatibility(ancestor: &TaxonRecord, child: &Query) -> Result<(), TaxonError> {
    if child.ranks.is_empty() {
        return Ok(());
    }
    let Some(below) = ranks_at_or_below(&ancestor.rank) else {
        tracing::warn!(rank = %ancestor.rank, "ancestor has an unknown rank; skipping rank check");
        return Ok(());
    };
    if child.ranks.iter().any(|rank| below.iter().any(|allowed| *allowed == rank.as_str())) {
        Ok(())
    } else {
        Err(TaxonError::RankIncompatibility {
            rank: ancestor.rank.clone(),
        })
    }
}

/// Looks taxa up and picks the best match.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    search: S,
}

impl<S> Resolver<S>
where
    S: TaxonSearch,
{
    pub fn new(search: S) -> Self {
        Resolver { search }
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    /// Resolve one query, optionally under an ancestor.
    pub async fn resolve(
        &self,
        query: &Query,
        ancestor_id: Option<u64>,
    ) -> Result<TaxonRecord, TaxonError> {
        let request = TaxonSearchRequest::for_query(query, ancestor_id);
        tracing::debug!(?request, "searching taxa");
        let records = self
            .search
            .search(&request)
            .await
            .map_err(TaxonError::search)?;
        if records.is_empty() {
            return Err(TaxonError::NoCandidates);
        }
        match_taxon(query, &records, ancestor_id).cloned()
    }

    /// Resolve the taxon part of a compound query.
    ///
    /// With both parts, the ancestor is resolved first and the subject is
    /// then searched under it. Returns `None` when the query names no taxon.
    pub async fn resolve_compound(
        &self,
        query: &CompoundQuery,
    ) -> Result<Option<TaxonRecord>, TaxonError> {
        match (&query.ancestor, &query.main) {
            (Some(ancestor), Some(main)) => {
                let ancestor = self.resolve(ancestor, None).await?;
                check_rank_compatibility(&ancestor, main)?;
                self.resolve(main, Some(ancestor.taxon_id)).await.map(Some)
            }
            (Some(ancestor), None) => self.resolve(ancestor, None).await.map(Some),
            (None, Some(main)) => self.resolve(main, None).await.map(Some),
            (None, None) => Ok(None),
        }
    }
}
