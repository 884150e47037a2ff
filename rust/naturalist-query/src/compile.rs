//! The full pipeline: text → normalized text → canonical tokens → query.

use serde::Serialize;

use crate::bind::{CompoundQuery, bind};
use crate::error::QueryError;
use crate::lexer::{Lexer, LexerConfig};
use crate::macros::MacroTable;
use crate::normalize::{Link, normalize, observation_link, replace_taxon_link};

/// The result of compiling user text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Compiled {
    /// The text carries an observation link; no query is built.
    ObservationLink { text: String, link: Link },
    Query {
        canonical: String,
        query: CompoundQuery,
    },
}

/// Compiles natural language text with a macro table and lexer settings.
#[derive(Debug, Clone)]
pub struct Compiler {
    macros: MacroTable,
    config: LexerConfig,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(MacroTable::builtin(), LexerConfig::default())
    }
}

impl Compiler {
    pub fn new(macros: MacroTable, config: LexerConfig) -> Self {
        Compiler { macros, config }
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// The canonical token string for `text`.
    ///
    /// A taxon link is replaced by its id, so a link at the start of the
    /// text becomes the subject and the words after it still apply.
    /// Observation links are not queries and are returned unchanged.
    pub fn canonicalize(&self, text: &str) -> Result<String, QueryError> {
        if observation_link(text).is_some() {
            return Ok(text.to_string());
        }
        let text = replace_taxon_link(text);
        Lexer::new(&self.macros, self.config.clone()).canonicalize(&normalize(&text))
    }

    pub fn compile(&self, text: &str) -> Result<Compiled, QueryError> {
        if let Some(link) = observation_link(text) {
            tracing::debug!(url = %link.url, "found observation link");
            return Ok(Compiled::ObservationLink {
                text: text.to_string(),
                link,
            });
        }
        let canonical = self.canonicalize(text)?;
        let query = bind(&canonical)?;
        Ok(Compiled::Query { canonical, query })
    }
}

/// Compile `text` with the built-in macros and default settings.
pub fn compile(text: &str) -> Result<Compiled, QueryError> {
    Compiler::default().compile(text)
}
