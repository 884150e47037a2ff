//! Quote-aware word splitting.
//!
//! Words are separated by whitespace. A word that *starts* with `"` or `'`
//! runs to the matching closing quote, spaces included, and keeps both quote
//! characters so that later stages can tell an exact phrase from loose
//! words. A quote character in the middle of a word has no special meaning.

use crate::error::QueryError;

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Split text into words, keeping quoted runs (and their quotes) intact.
pub fn split_words(text: &str) -> Result<Vec<String>, QueryError> {
    let mut words = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let mut word = String::new();

        if is_quote(ch) {
            word.push(ch);
            chars.next();
            loop {
                match chars.next() {
                    Some(next) => {
                        word.push(next);
                        if next == ch {
                            break;
                        }
                    }
                    None => return Err(QueryError::Syntax("No closing quotation".into())),
                }
            }
        } else {
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    break;
                }
                word.push(next);
                chars.next();
            }
        }

        words.push(word);
    }

    Ok(words)
}

/// The contents of a quoted word, or `None` for an ordinary word.
pub fn unquote(word: &str) -> Option<&str> {
    let mut chars = word.chars();
    let first = chars.next().filter(|ch| is_quote(*ch))?;
    if word.len() < 2 || !word.ends_with(first) {
        return None;
    }
    Some(&word[1..word.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_splits_on_whitespace() {
        assert_eq!(
            split_words("  fish  from\tcanada ").unwrap(),
            vec!["fish", "from", "canada"]
        );
    }

    #[test]
    fn it_keeps_quoted_runs_with_quotes() {
        assert_eq!(
            split_words(r#""great blue heron" by me"#).unwrap(),
            vec![r#""great blue heron""#, "by", "me"]
        );
        assert_eq!(
            split_words("'red fox'").unwrap(),
            vec!["'red fox'"]
        );
    }

    #[test]
    fn a_closing_quote_ends_the_word() {
        assert_eq!(
            split_words(r#""a b"c d"#).unwrap(),
            vec![r#""a b""#, "c", "d"]
        );
    }

    #[test]
    fn inner_quotes_are_literal() {
        assert_eq!(
            split_words("o'brien's pond").unwrap(),
            vec!["o'brien's", "pond"]
        );
    }

    #[test]
    fn unbalanced_quotes_are_a_syntax_error() {
        let error = split_words(r#"fish "from canada"#).unwrap_err();
        assert!(matches!(error, QueryError::Syntax(_)));
        assert_eq!(error.to_string(), "No closing quotation");
    }

    #[test]
    fn it_unquotes_phrases() {
        assert_eq!(unquote(r#""great blue heron""#), Some("great blue heron"));
        assert_eq!(unquote("'x'"), Some("x"));
        assert_eq!(unquote("heron"), None);
        assert_eq!(unquote("\""), None);
    }
}
