//! Text normalization ahead of tokenization.
//!
//! A handful of keyword phrases span two words ("not by", "in prj",
//! "added since"). They are glued into single hyphenated words here so that
//! the lexer sees them as one flag. The rewrites run on the raw text, before
//! quotes are interpreted, so a quoted phrase containing one of these word
//! pairs is rewritten as well.
//!
//! Links to observations and taxa are detected here too.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static NOT_OR_ID_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^| )(id|not) ?(by)\b").unwrap());

static IN_PROJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^| )(in) ?(prj)\b").unwrap());

static ADDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^| )(added) ?(on|since|until)\b").unwrap());

static OBSERVATION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<url>https?://(www\.)?inaturalist\.(org|ca)/observations/(?P<id>\d+))\b",
    )
    .unwrap()
});

static TAXON_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<url>https?://(www\.)?inaturalist\.(org|ca)/taxa/(?P<id>\d+))\b")
        .unwrap()
});

/// A link found in user text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub url: String,
    pub id: u64,
}

impl Link {
    fn capture(pattern: &Regex, text: &str) -> Option<Link> {
        let captures = pattern.captures(text)?;
        Some(Link {
            url: captures.name("url")?.as_str().to_string(),
            id: captures.name("id")?.as_str().parse().ok()?,
        })
    }
}

/// The first observation link in `text`.
pub fn observation_link(text: &str) -> Option<Link> {
    Link::capture(&OBSERVATION_LINK, text)
}

/// The first taxon link in `text`.
pub fn taxon_link(text: &str) -> Option<Link> {
    Link::capture(&TAXON_LINK, text)
}

/// Replace the first taxon link in `text` with its bare id.
pub fn replace_taxon_link(text: &str) -> Cow<'_, str> {
    TAXON_LINK.replace(text, "$id")
}

/// Glue multi-word keywords into single hyphenated words. Only the
/// separator changes; the words keep their case.
pub fn normalize(text: &str) -> String {
    [&*NOT_OR_ID_BY, &*IN_PROJECT, &*ADDED]
        .into_iter()
        .fold(text.to_string(), |text, pattern| {
            pattern.replace_all(&text, "${1}${2}-${3}").into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_glues_not_by_and_id_by() {
        assert_eq!(normalize("fish not by me"), "fish not-by me");
        assert_eq!(normalize("id by me"), "id-by me");
        assert_eq!(normalize("fish notby me"), "fish not-by me");
        assert_eq!(normalize("fish by me"), "fish by me");
    }

    #[test]
    fn it_glues_project_and_added() {
        assert_eq!(normalize("birds in prj bioblitz"), "birds in-prj bioblitz");
        assert_eq!(normalize("added since 2021-01-01"), "added-since 2021-01-01");
        assert_eq!(normalize("added on today"), "added-on today");
        assert_eq!(normalize("x addeduntil y"), "x added-until y");
    }

    #[test]
    fn it_ignores_case() {
        assert_eq!(normalize("Fish NOT BY me"), "Fish NOT-BY me");
        assert_eq!(normalize("In Prj x"), "In-Prj x");
        assert_eq!(normalize("Added Since may"), "Added-Since may");
    }

    #[test]
    fn it_requires_a_word_boundary_before_the_phrase() {
        assert_eq!(normalize("cannot by x"), "cannot by x");
        assert_eq!(normalize("paid by x"), "paid by x");
    }

    #[test]
    fn it_rewrites_inside_quotes() {
        assert_eq!(normalize("\"fish not by me\" by me"), "\"fish not-by me\" by me");
        assert_eq!(normalize("\"x not by y\""), "\"x not-by y\"");
    }

    #[test]
    fn it_glues_phrases_at_the_end_of_the_text() {
        assert_eq!(normalize("not by"), "not-by");
        assert_eq!(normalize("fish in prj"), "fish in-prj");
        assert_eq!(normalize("added since"), "added-since");
        assert_eq!(normalize("fish not by"), "fish not-by");
    }

    #[test]
    fn adjacent_phrases_are_all_glued() {
        assert_eq!(normalize("not by me in prj x"), "not-by me in-prj x");
        assert_eq!(normalize("id by added on"), "id-by added-on");
    }

    #[test]
    fn longer_words_are_left_alone() {
        assert_eq!(normalize("not bye"), "not bye");
        assert_eq!(normalize("in prjs"), "in prjs");
        assert_eq!(normalize("added onward"), "added onward");
    }

    #[test]
    fn it_finds_links() {
        let link = observation_link("see https://www.inaturalist.org/observations/12345 !").unwrap();
        assert_eq!(link.url, "https://www.inaturalist.org/observations/12345");
        assert_eq!(link.id, 12345);

        let link = taxon_link("https://inaturalist.ca/taxa/3").unwrap();
        assert_eq!(link.id, 3);

        assert!(observation_link("https://inaturalist.org/taxa/3").is_none());
        assert!(taxon_link("birds by me").is_none());
    }

    #[test]
    fn taxon_links_are_replaced_by_their_id() {
        assert_eq!(
            replace_taxon_link("https://www.inaturalist.org/taxa/3 by me"),
            "3 by me"
        );
        assert_eq!(replace_taxon_link("fish by me"), "fish by me");
    }
}
