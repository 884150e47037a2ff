//! The argument binder: canonical tokens → [`CompoundQuery`].
//!
//! Tokens are grouped under the flag that precedes them. Repeating a flag
//! replaces its earlier value, except `--opt` and `--rank` which accumulate.
//! The words of `--of` and `--in` are further parsed into a taxon [`Query`].

use serde::Serialize;

use crate::error::QueryError;
use crate::flag::Flag;
use crate::rank::{canonical_rank, rank_level};
use crate::split::{split_words, unquote};

/// A taxon lookup: free words, exact phrases, and optional shortcuts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Every word of the query, phrase words included.
    pub terms: Vec<String>,
    /// Quoted runs, each as its list of words.
    pub phrases: Vec<Vec<String>>,
    /// A four or six letter code such as `GBHE`. Any lone word of that shape
    /// is taken as a candidate code since case is folded before binding; it
    /// only counts when it equals a candidate's matched term exactly.
    pub code: Option<String>,
    /// A numeric taxon id; the lookup goes straight to this id.
    pub taxon_id: Option<u64>,
    /// Requested ranks, canonical names, no duplicates.
    pub ranks: Vec<String>,
}

impl Query {
    /// Parse the words given to `--of` or `--in`.
    ///
    /// Leading rank words narrow the ranks as long as a word follows them
    /// (`family corvidae`). A lone number is a taxon id and a lone four or
    /// six letter word may be a code.
    pub fn parse(words: &[String]) -> Query {
        let mut query = Query::default();

        let mut rest = words;
        while rest.len() > 1 {
            match canonical_rank(&rest[0]) {
                Some(rank) => {
                    query.add_rank(rank);
                    rest = &rest[1..];
                }
                None => break,
            }
        }

        for word in rest {
            match unquote(word) {
                Some(phrase) => {
                    let phrase: Vec<String> =
                        phrase.split_whitespace().map(str::to_string).collect();
                    query.terms.extend(phrase.iter().cloned());
                    if !phrase.is_empty() {
                        query.phrases.push(phrase);
                    }
                }
                None => query.terms.push(word.clone()),
            }
        }

        if let [word] = rest {
            if unquote(word).is_none() {
                if word.chars().all(|ch| ch.is_ascii_digit()) {
                    query.taxon_id = word.parse().ok();
                } else if matches!(word.len(), 4 | 6)
                    && word.chars().all(|ch| ch.is_ascii_alphabetic())
                {
                    query.code = Some(word.to_ascii_uppercase());
                }
            }
        }

        query
    }

    pub fn add_rank(&mut self, rank: &str) {
        if !self.ranks.iter().any(|existing| existing == rank) {
            self.ranks.push(rank.to_string());
        }
    }

    /// The terms joined as the search service expects them.
    pub fn joined_terms(&self) -> String {
        self.terms.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.taxon_id.is_none()
    }
}

/// A controlled annotation, e.g. `with life larva`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlledTerm {
    pub term: String,
    pub value: String,
}

/// Everything a natural language query can say.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompoundQuery {
    pub main: Option<Query>,
    pub ancestor: Option<Query>,
    pub user: Option<String>,
    pub unobserved_by: Option<String>,
    pub id_by: Option<String>,
    pub place: Option<String>,
    pub project: Option<String>,
    pub controlled_term: Option<ControlledTerm>,
    pub per: Option<String>,
    pub options: Vec<String>,
    /// `--rank` values given without a subject; with a subject they live
    /// on [`CompoundQuery::main`].
    pub ranks: Vec<String>,
    pub added_on: Option<String>,
    pub added_since: Option<String>,
    pub added_until: Option<String>,
}

impl CompoundQuery {
    fn set(&mut self, flag: Flag, values: Vec<String>) -> Result<(), QueryError> {
        let joined = || values.join(" ");
        match flag {
            Flag::Of => self.main = Some(Query::parse(&values)),
            Flag::In => self.ancestor = Some(Query::parse(&values)),
            Flag::By => self.user = Some(joined()),
            Flag::NotBy => self.unobserved_by = Some(joined()),
            Flag::IdBy => self.id_by = Some(joined()),
            Flag::From => self.place = Some(joined()),
            Flag::InPrj => self.project = Some(joined()),
            Flag::Per => self.per = Some(joined()),
            Flag::AddedOn => self.added_on = Some(joined()),
            Flag::AddedSince => self.added_since = Some(joined()),
            Flag::AddedUntil => self.added_until = Some(joined()),
            Flag::With => {
                self.controlled_term = Some(ControlledTerm {
                    term: values[0].clone(),
                    value: values[1..].join(" "),
                })
            }
            Flag::Opt => self.options.extend(values),
            Flag::Rank => {
                for value in &values {
                    let rank = canonical_rank(value)
                        .ok_or_else(|| QueryError::UnknownRank(value.clone()))?;
                    if !self.ranks.iter().any(|existing| existing == rank) {
                        self.ranks.push(rank.to_string());
                    }
                }
            }
        }
        Ok(())
    }

    /// Move subject-less ranks onto the subject, if there is one.
    fn attach_ranks(&mut self) {
        if let Some(main) = self.main.as_mut() {
            for rank in self.ranks.drain(..) {
                main.add_rank(&rank);
            }
        }
    }

    /// Explicit child ranks must reach at or below some explicit ancestor
    /// rank.
    fn check_ranks(&self) -> Result<(), QueryError> {
        let (Some(main), Some(ancestor)) = (&self.main, &self.ancestor) else {
            return Ok(());
        };
        let coarsest = ancestor
            .ranks
            .iter()
            .filter_map(|rank| rank_level(rank).map(|level| (level, rank)))
            .min();
        let Some((ancestor_level, ancestor_rank)) = coarsest else {
            return Ok(());
        };
        if main.ranks.is_empty()
            || main
                .ranks
                .iter()
                .any(|rank| rank_level(rank).is_some_and(|level| level >= ancestor_level))
        {
            return Ok(());
        }
        Err(QueryError::IncompatibleRanks {
            ancestor: ancestor_rank.clone(),
        })
    }
}

/// Bind a canonical token string.
pub fn bind(canonical: &str) -> Result<CompoundQuery, QueryError> {
    bind_tokens(&split_words(canonical)?)
}

/// Bind already split canonical tokens.
pub fn bind_tokens(tokens: &[String]) -> Result<CompoundQuery, QueryError> {
    let mut groups: Vec<(Flag, Vec<String>)> = Vec::new();

    for token in tokens {
        if let Some(name) = token.strip_prefix("--") {
            let flag =
                Flag::from_name(name).ok_or_else(|| QueryError::UnknownFlag(name.to_string()))?;
            groups.push((flag, Vec::new()));
            continue;
        }
        match groups.last_mut() {
            Some((_, values)) => values.push(token.clone()),
            None => {
                return Err(QueryError::Syntax(format!(
                    "expected a flag before \"{token}\""
                )));
            }
        }
    }

    // A flag left empty because a macro supplied its value later
    // (`--of --opt ... --of aves`) is dropped.
    let groups: Vec<_> = groups
        .iter()
        .enumerate()
        .filter(|(index, (flag, values))| {
            !values.is_empty() || !groups[index + 1..].iter().any(|(later, _)| later == flag)
        })
        .map(|(_, group)| group.clone())
        .collect();

    let mut query = CompoundQuery::default();
    for (flag, values) in groups {
        if values.len() < flag.arity() {
            return Err(QueryError::MissingValue {
                flag: flag.name().to_string(),
                expected: flag.arity(),
            });
        }
        query.set(flag, values)?;
    }
    query.attach_ranks();
    query.check_ranks()?;

    Ok(query)
}
