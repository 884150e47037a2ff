//! Compiles short natural language observation queries such as
//! `"rg birds from home not by me"` into structured [`CompoundQuery`]
//! values.
//!
//! Compilation runs in three stages:
//!
//! 1. [`normalize`] glues multi-word keywords (`not by`, `in prj`,
//!    `added since`) into single words.
//! 2. The [`Lexer`] folds the words into a canonical `--flag value...`
//!    stream, expanding [`Macro`] keywords from a [`MacroTable`].
//! 3. [`bind`] groups the canonical stream into a [`CompoundQuery`].
//!
//! ```
//! use naturalist_query::{Compiled, compile};
//!
//! let Compiled::Query { canonical, query } = compile("fish from canada by me").unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(canonical, "--of fish --from canada --by me");
//! assert_eq!(query.user.as_deref(), Some("me"));
//! ```

pub mod bind;
pub mod compile;
pub mod error;
pub mod flag;
pub mod lexer;
pub mod macros;
pub mod normalize;
pub mod rank;
pub mod split;

pub use bind::{CompoundQuery, ControlledTerm, Query, bind, bind_tokens};
pub use compile::{Compiled, Compiler, compile};
pub use error::QueryError;
pub use flag::{ExpectedArgs, Flag};
pub use lexer::{Lexer, LexerConfig, MacroRecognition};
pub use macros::{Macro, MacroTable};
pub use normalize::{Link, normalize, observation_link, replace_taxon_link, taxon_link};
pub use rank::{RANK_EQUIVALENTS, RANKS, canonical_rank, rank_level, ranks_at_or_below};
pub use split::{split_words, unquote};
