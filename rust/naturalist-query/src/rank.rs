//! Taxonomic ranks and their canonical ordering.

/// Every rank, coarsest first.
pub static RANKS: [&str; 35] = [
    "stateofmatter",
    "kingdom",
    "phylum",
    "subphylum",
    "superclass",
    "class",
    "subclass",
    "infraclass",
    "subterclass",
    "superorder",
    "order",
    "suborder",
    "infraorder",
    "parvorder",
    "zoosection",
    "zoosubsection",
    "superfamily",
    "epifamily",
    "family",
    "subfamily",
    "supertribe",
    "tribe",
    "subtribe",
    "genus",
    "genushybrid",
    "subgenus",
    "section",
    "subsection",
    "complex",
    "species",
    "hybrid",
    "subspecies",
    "variety",
    "form",
    "infrahybrid",
];

/// Abbreviations users commonly type in place of a rank name.
pub static RANK_EQUIVALENTS: [(&str, &str); 12] = [
    ("sp", "species"),
    ("ssp", "subspecies"),
    ("subsp", "subspecies"),
    ("var", "variety"),
    ("f", "form"),
    ("gen", "genus"),
    ("fam", "family"),
    ("ord", "order"),
    ("cls", "class"),
    ("phy", "phylum"),
    ("kd", "kingdom"),
    ("sect", "section"),
];

/// Resolve a word to its canonical rank name.
pub fn canonical_rank(word: &str) -> Option<&'static str> {
    RANKS.iter().copied().find(|rank| *rank == word).or_else(|| {
        RANK_EQUIVALENTS
            .iter()
            .find(|(alias, _)| *alias == word)
            .map(|(_, rank)| *rank)
    })
}

/// Position of a rank in [`RANKS`].
pub fn rank_level(rank: &str) -> Option<usize> {
    RANKS.iter().position(|candidate| *candidate == rank)
}

/// The given rank and every finer one.
pub fn ranks_at_or_below(rank: &str) -> Option<&'static [&'static str]> {
    rank_level(rank).map(|level| &RANKS[level..])
}
