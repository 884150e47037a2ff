//! The flag vocabulary shared by the lexer and the argument binder.
//!
//! Every canonical token stream is a sequence of `--flag value...` groups
//! drawn from this vocabulary. The lexer uses the same table to decide when
//! a bare word in user text (`by`, `from`, `not-by`) is really a flag.

use std::fmt;

/// A recognized query flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// The subject taxon.
    Of,
    /// An ancestor taxon the subject must descend from.
    In,
    By,
    NotBy,
    IdBy,
    From,
    InPrj,
    /// A controlled term and its value, e.g. `with life larva`.
    With,
    Per,
    Opt,
    Rank,
    AddedOn,
    AddedSince,
    AddedUntil,
}

impl Flag {
    /// All flags, in the order they are documented.
    pub const ALL: [Flag; 14] = [
        Flag::Of,
        Flag::In,
        Flag::By,
        Flag::NotBy,
        Flag::IdBy,
        Flag::From,
        Flag::InPrj,
        Flag::With,
        Flag::Per,
        Flag::Opt,
        Flag::Rank,
        Flag::AddedOn,
        Flag::AddedSince,
        Flag::AddedUntil,
    ];

    /// The flag's name without the leading `--`.
    pub fn name(self) -> &'static str {
        match self {
            Flag::Of => "of",
            Flag::In => "in",
            Flag::By => "by",
            Flag::NotBy => "not-by",
            Flag::IdBy => "id-by",
            Flag::From => "from",
            Flag::InPrj => "in-prj",
            Flag::With => "with",
            Flag::Per => "per",
            Flag::Opt => "opt",
            Flag::Rank => "rank",
            Flag::AddedOn => "added-on",
            Flag::AddedSince => "added-since",
            Flag::AddedUntil => "added-until",
        }
    }

    /// Look up a flag by name (without the leading `--`).
    pub fn from_name(name: &str) -> Option<Flag> {
        Flag::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Parse a `--name` token.
    pub fn from_token(token: &str) -> Option<Flag> {
        token.strip_prefix("--").and_then(Flag::from_name)
    }

    /// Minimum number of values the flag takes.
    pub fn arity(self) -> usize {
        match self {
            Flag::With => 2,
            _ => 1,
        }
    }

    pub fn token(self) -> String {
        format!("--{}", self.name())
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.name())
    }
}

/// Which bare words the lexer currently promotes to flags.
///
/// Before the subject starts every flag name counts. Once `--of` has been
/// seen (explicitly or implicitly) the word `of` is ordinary text again, so
/// that "bird of paradise" survives intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectedArgs {
    #[default]
    Argparse,
    Remaining,
}

impl ExpectedArgs {
    /// The flag a bare (lower-cased) word stands for, if any.
    pub fn recognize(self, word: &str) -> Option<Flag> {
        let flag = Flag::from_name(word)?;
        match (self, flag) {
            (ExpectedArgs::Remaining, Flag::Of) => None,
            _ => Some(flag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_every_flag_name() {
        for flag in Flag::ALL {
            assert_eq!(Flag::from_name(flag.name()), Some(flag));
            assert_eq!(Flag::from_token(&flag.token()), Some(flag));
        }
    }

    #[test]
    fn it_rejects_unknown_names() {
        assert_eq!(Flag::from_name("near"), None);
        assert_eq!(Flag::from_token("of"), None);
    }

    #[test]
    fn remaining_args_exclude_of() {
        assert_eq!(ExpectedArgs::Argparse.recognize("of"), Some(Flag::Of));
        assert_eq!(ExpectedArgs::Remaining.recognize("of"), None);
        assert_eq!(ExpectedArgs::Remaining.recognize("by"), Some(Flag::By));
        assert_eq!(ExpectedArgs::Remaining.recognize("fish"), None);
    }
}
