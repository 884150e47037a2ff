//! The lexer and macro expander.
//!
//! Normalized text is split into words and folded left to right into a
//! canonical `--flag value...` stream. The fold carries a [`LexerState`]:
//!
//! - [`ExpectedArgs`] decides which bare words are promoted to flags.
//! - [`MacroRecognition`] decides whether a macro keyword expands. Right
//!   after a flag (other than `--of`) the next word is that flag's value and
//!   is taken literally, so `from home` means the place "home" and not the
//!   `home` macro.
//! - [`Pending`] collects macro expansions until they can be emitted.
//!
//! ```text
//! fish from canada by me  →  --of fish --from canada --by me
//! rg birds my             →  --opt quality_grade=research --by me --of aves
//! ```

use crate::error::QueryError;
use crate::flag::{ExpectedArgs, Flag};
use crate::macros::{Macro, MacroTable};
use crate::rank::canonical_rank;
use crate::split::split_words;

use serde::{Deserialize, Serialize};

/// Lexer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerConfig {
    /// Treat bare rank words ("kingdom", "species") as pending `--rank`
    /// values. Off by default: it turns "from united kingdom" into a place
    /// of "united" plus a rank.
    #[serde(default)]
    pub expand_rank_keywords: bool,
}

impl LexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rank_keywords(mut self, expand: bool) -> Self {
        self.expand_rank_keywords = expand;
        self
    }
}

/// Whether the next word may be expanded as a macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroRecognition {
    #[default]
    Enabled,
    /// The previous token was a flag whose value comes next.
    Suppressed,
}

/// Macro expansions waiting to be emitted.
///
/// Options and ranks accumulate. Each of `by`, `from` and `of` holds at
/// most one value and the latest one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pending {
    pub ranks: Vec<String>,
    pub options: Vec<String>,
    pub by: Option<String>,
    pub from: Option<String>,
    pub of: Option<String>,
}

impl Pending {
    /// Merge a macro's expansion.
    pub fn apply(&mut self, expansion: &Macro) {
        self.options.extend(expansion.opt.iter().cloned());
        if let Some(by) = &expansion.by {
            self.by = Some(by.clone());
        }
        if let Some(from) = &expansion.from {
            self.from = Some(from.clone());
        }
        if let Some(of) = &expansion.of {
            self.of = Some(of.clone());
        }
    }

    /// Forget the pending value an explicit flag supersedes.
    pub fn supersede(&mut self, flag: Flag) {
        match flag {
            Flag::By => self.by = None,
            Flag::From => self.from = None,
            Flag::Of => self.of = None,
            _ => {}
        }
    }

    /// Append everything still pending, in canonical order.
    pub fn flush(self, output: &mut Vec<String>) {
        if !self.ranks.is_empty() {
            output.push(Flag::Rank.token());
            output.extend(self.ranks);
        }
        if !self.options.is_empty() {
            output.push(Flag::Opt.token());
            output.extend(self.options);
        }
        for (flag, value) in [(Flag::By, self.by), (Flag::From, self.from), (Flag::Of, self.of)] {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                output.push(flag.token());
                output.push(value);
            }
        }
    }
}

/// The state threaded through the fold over words.
#[derive(Debug, Clone, Default)]
pub struct LexerState {
    pub expected_args: ExpectedArgs,
    pub macros: MacroRecognition,
    /// Flags (explicit or implicit) seen so far.
    pub arg_count: usize,
    pub pending: Pending,
    pub output: Vec<String>,
}

impl LexerState {
    /// A `--` token. Every flag expects a value, so macros are suppressed
    /// for the next word, except after `--of` where the subject may itself
    /// contain macros (`--of rg birds`).
    pub fn on_flag(&mut self, token: String) {
        self.arg_count += 1;
        let flag = Flag::from_token(&token);

        if flag == Some(Flag::Of) {
            self.expected_args = ExpectedArgs::Remaining;
            self.macros = MacroRecognition::Enabled;
        } else {
            self.macros = MacroRecognition::Suppressed;
        }

        match flag {
            Some(Flag::Opt) if !self.pending.options.is_empty() => {
                self.output.push(token);
                self.output.append(&mut self.pending.options);
            }
            Some(Flag::Rank) if !self.pending.ranks.is_empty() => {
                self.output.push(token);
                self.output.append(&mut self.pending.ranks);
            }
            Some(flag) => {
                self.pending.supersede(flag);
                self.output.push(token);
            }
            None => self.output.push(token),
        }
    }

    /// Expand `word` if it is an eligible macro or rank keyword. Returns
    /// whether the word was consumed.
    pub fn on_keyword(&mut self, word: &str, table: &MacroTable, config: &LexerConfig) -> bool {
        if self.macros == MacroRecognition::Suppressed {
            return false;
        }
        if config.expand_rank_keywords {
            if let Some(rank) = canonical_rank(word) {
                self.pending.ranks.push(rank.to_string());
                return true;
            }
        }
        match table.get(word) {
            Some(expansion) if !expansion.is_empty() => {
                self.pending.apply(expansion);
                true
            }
            _ => false,
        }
    }

    /// An ordinary word. The first one before any flag starts the subject.
    pub fn on_word(&mut self, word: String) {
        if self.arg_count == 0 {
            self.arg_count += 1;
            self.output.push(Flag::Of.token());
            self.pending.of = None;
            self.expected_args = ExpectedArgs::Remaining;
        }
        self.output.push(word);
        self.macros = MacroRecognition::Enabled;
    }

    /// Flush pending expansions and make sure the stream opens with a flag.
    /// An empty stream becomes a bare `--of`, which the binder rejects as a
    /// missing subject.
    pub fn finish(mut self) -> Vec<String> {
        let pending = std::mem::take(&mut self.pending);
        pending.flush(&mut self.output);
        let opens_with_flag = self
            .output
            .first()
            .is_some_and(|first| first.starts_with("--"));
        if !opens_with_flag {
            self.output.insert(0, Flag::Of.token());
        }
        self.output
    }
}

/// Turns normalized text into canonical tokens.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    macros: &'a MacroTable,
    config: LexerConfig,
}

impl<'a> Lexer<'a> {
    pub fn new(macros: &'a MacroTable, config: LexerConfig) -> Self {
        Lexer { macros, config }
    }

    /// Lex normalized text into canonical tokens.
    pub fn tokens(&self, normalized: &str) -> Result<Vec<String>, QueryError> {
        let mut state = LexerState::default();

        for word in split_words(normalized)? {
            let mut word = word.to_lowercase();
            if let Some(flag) = state.expected_args.recognize(&word) {
                word = flag.token();
            }

            if word.starts_with("--") {
                state.on_flag(word);
                continue;
            }
            if state.on_keyword(&word, self.macros, &self.config) {
                continue;
            }
            state.on_word(word);
        }

        Ok(state.finish())
    }

    /// Lex normalized text into a single space-joined canonical string.
    pub fn canonicalize(&self, normalized: &str) -> Result<String, QueryError> {
        let canonical = self.tokens(normalized)?.join(" ");
        tracing::debug!(input = normalized, %canonical, "canonicalized query");
        Ok(canonical)
    }
}
