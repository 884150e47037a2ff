//! Keyword macros.
//!
//! A macro is a single word that stands for a bundle of canonical flag
//! values: `rg` means `--opt quality_grade=research`, `my` means `--by me`,
//! `birds` means `--of aves`. The table is plain data; the lexer decides when
//! a word is eligible for expansion.
//!
//! Additional macros can be loaded from JSON keyed by keyword:
//!
//! ```
//! use naturalist_query::MacroTable;
//!
//! let mut table = MacroTable::builtin();
//! table.extend(MacroTable::from_json(r#"{"frogs": {"of": "anura"}}"#).unwrap());
//! assert_eq!(table.get("frogs").and_then(|m| m.of.as_deref()), Some("anura"));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// The expansion of one keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opt: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of: Option<String>,
}

impl Macro {
    pub fn options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Macro {
            opt: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn user(user: impl Into<String>) -> Self {
        Macro {
            by: Some(user.into()),
            ..Default::default()
        }
    }

    pub fn place(place: impl Into<String>) -> Self {
        Macro {
            from: Some(place.into()),
            ..Default::default()
        }
    }

    pub fn taxon(taxon: impl Into<String>) -> Self {
        Macro {
            of: Some(taxon.into()),
            ..Default::default()
        }
    }

    /// A macro with no fields. Its keyword is treated as an ordinary word.
    pub fn is_empty(&self) -> bool {
        self.opt.is_empty() && self.by.is_none() && self.from.is_none() && self.of.is_none()
    }
}

/// Keyword → [`Macro`] lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacroTable {
    macros: HashMap<String, Macro>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The keywords every deployment understands.
    pub fn builtin() -> Self {
        let mut table = MacroTable::new();
        table.insert("rg", Macro::options(["quality_grade=research"]));
        table.insert("nid", Macro::options(["quality_grade=needs_id"]));
        table.insert("oldest", Macro::options(["order=asc", "order_by=observed_on"]));
        table.insert("newest", Macro::options(["order=desc", "order_by=observed_on"]));
        table.insert("reverse", Macro::options(["order=asc"]));
        table.insert("faves", Macro::options(["popular", "order_by=votes"]));
        table.insert("spp", Macro::options(["hrank=species"]));
        table.insert("my", Macro::user("me"));
        table.insert("home", Macro::place("home"));
        table.insert("birds", Macro::taxon("aves"));
        table.insert("herps", Macro::taxon("herptiles"));
        table.insert("mammals", Macro::taxon("mammalia"));
        table.insert("insects", Macro::taxon("insecta"));
        table.insert("spiders", Macro::taxon("araneae"));
        table.insert("plants", Macro::taxon("plantae"));
        table.insert("lichens", Macro::taxon("lecanoromycetes"));
        table.insert("mosses", Macro::taxon("bryophyta"));
        table
    }

    /// Parse a JSON object of `keyword: macro` pairs.
    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Define (or redefine) a keyword. Keywords are stored lower-case.
    pub fn insert(&mut self, keyword: impl Into<String>, expansion: Macro) {
        self.macros.insert(keyword.into().to_lowercase(), expansion);
    }

    /// Merge another table over this one; its definitions win.
    pub fn extend(&mut self, other: MacroTable) {
        for (keyword, expansion) in other.macros {
            self.insert(keyword, expansion);
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&Macro> {
        self.macros.get(keyword)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_table_has_each_category() {
        let table = MacroTable::builtin();
        assert_eq!(table.get("rg").unwrap().opt, vec!["quality_grade=research"]);
        assert_eq!(table.get("my").unwrap().by.as_deref(), Some("me"));
        assert_eq!(table.get("home").unwrap().from.as_deref(), Some("home"));
        assert_eq!(table.get("birds").unwrap().of.as_deref(), Some("aves"));
    }

    #[test]
    fn json_definitions_override_builtins() {
        let mut table = MacroTable::builtin();
        let custom = MacroTable::from_json(
            r#"{"home": {"from": "ontario"}, "Oldies": {"opt": ["order=asc"]}}"#,
        )
        .unwrap();
        table.extend(custom);

        assert_eq!(table.get("home"), Some(&Macro::place("ontario")));
        assert_eq!(table.get("oldies"), Some(&Macro::options(["order=asc"])));
    }

    #[test]
    fn empty_definition_is_an_alias() {
        let table = MacroTable::from_json(r#"{"plain": {}}"#).unwrap();
        assert!(table.get("plain").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = MacroTable::from_json(r#"{"rg": {"opt": "not a list"}}"#);
        assert!(matches!(result, Err(QueryError::InvalidMacros(_))));
    }
}
