//! Taxon records as returned by a name search.

use serde::{Deserialize, Serialize};

use crate::error::TaxonError;

/// One candidate taxon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct TaxonRecord {
    pub name: String,
    pub taxon_id: u64,
    /// Preferred common name.
    pub common: Option<String>,
    /// The name or synonym the search matched on.
    pub term: Option<String>,
    pub thumbnail: Option<String>,
    pub rank: String,
    pub ancestor_ids: Vec<u64>,
    pub observations_count: u64,
}

#[derive(Deserialize)]
struct Photo {
    square_url: Option<String>,
}

/// The search service's field names. The aliases accept records as this
/// crate serializes them.
#[derive(Deserialize)]
struct RawRecord {
    name: String,
    id: Option<u64>,
    taxon_id: Option<u64>,
    #[serde(alias = "common")]
    preferred_common_name: Option<String>,
    #[serde(alias = "term")]
    matched_term: Option<String>,
    default_photo: Option<Photo>,
    thumbnail: Option<String>,
    rank: String,
    #[serde(default)]
    ancestor_ids: Vec<u64>,
    #[serde(default)]
    observations_count: u64,
}

impl TryFrom<RawRecord> for TaxonRecord {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let taxon_id = raw
            .id
            .or(raw.taxon_id)
            .ok_or_else(|| format!("taxon {} has neither id nor taxon_id", raw.name))?;
        Ok(TaxonRecord {
            name: raw.name,
            taxon_id,
            common: raw.preferred_common_name,
            term: raw.matched_term,
            thumbnail: raw
                .default_photo
                .and_then(|photo| photo.square_url)
                .or(raw.thumbnail),
            rank: raw.rank,
            ancestor_ids: raw.ancestor_ids,
            observations_count: raw.observations_count,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Results {
    Envelope { results: Vec<TaxonRecord> },
    List(Vec<TaxonRecord>),
}

impl TaxonRecord {
    /// Parse search results, either a bare array or a `{"results": [...]}`
    /// envelope.
    pub fn from_results(json: &str) -> Result<Vec<TaxonRecord>, TaxonError> {
        Ok(match serde_json::from_str(json)? {
            Results::Envelope { results } => results,
            Results::List(records) => records,
        })
    }

    /// Whether `ancestor_id` is one of this taxon's ancestors.
    pub fn descends_from(&self, ancestor_id: u64) -> bool {
        self.ancestor_ids.contains(&ancestor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HERON: &str = r#"{
        "id": 4956,
        "name": "Ardea herodias",
        "preferred_common_name": "Great Blue Heron",
        "matched_term": "Great Blue Heron",
        "default_photo": {"square_url": "https://example.org/heron.jpg"},
        "rank": "species",
        "ancestor_ids": [48460, 1, 2, 355675, 3, 4929, 4930, 4955, 4956],
        "observations_count": 123456
    }"#;

    #[test]
    fn it_maps_search_fields() {
        let record: TaxonRecord = serde_json::from_str(HERON).unwrap();
        assert_eq!(
            record,
            TaxonRecord {
                name: "Ardea herodias".into(),
                taxon_id: 4956,
                common: Some("Great Blue Heron".into()),
                term: Some("Great Blue Heron".into()),
                thumbnail: Some("https://example.org/heron.jpg".into()),
                rank: "species".into(),
                ancestor_ids: vec![48460, 1, 2, 355675, 3, 4929, 4930, 4955, 4956],
                observations_count: 123456,
            }
        );
        assert!(record.descends_from(3));
        assert!(!record.descends_from(47126));
    }

    #[test]
    fn it_accepts_taxon_id_and_missing_extras() {
        let record: TaxonRecord =
            serde_json::from_str(r#"{"taxon_id": 3, "name": "Aves", "rank": "class"}"#).unwrap();
        assert_eq!(record.taxon_id, 3);
        assert_eq!(record.common, None);
        assert_eq!(record.thumbnail, None);
        assert!(record.ancestor_ids.is_empty());
    }

    #[test]
    fn it_requires_an_id() {
        let result = TaxonRecord::from_results(r#"[{"name": "Aves", "rank": "class"}]"#);
        assert!(matches!(result, Err(TaxonError::InvalidRecord(_))));
    }

    #[test]
    fn serialized_records_read_back() {
        let record: TaxonRecord = serde_json::from_str(HERON).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let records = TaxonRecord::from_results(&format!("[{json}]")).unwrap();
        assert_eq!(records, vec![record]);
    }

    #[test]
    fn it_reads_result_envelopes() {
        let records = TaxonRecord::from_results(&format!(r#"{{"results": [{HERON}]}}"#)).unwrap();
        assert_eq!(records.len(), 1);
        let records = TaxonRecord::from_results(&format!("[{HERON}, {HERON}]")).unwrap();
        assert_eq!(records.len(), 2);
    }
}
