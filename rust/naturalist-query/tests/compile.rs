use anyhow::Result;
use naturalist_query::{
    Compiled, Compiler, CompoundQuery, LexerConfig, Macro, MacroTable, QueryError, normalize,
};
use pretty_assertions::assert_eq;

fn canonical(compiler: &Compiler, text: &str) -> Result<String> {
    Ok(compiler.canonicalize(text)?)
}

fn query(compiler: &Compiler, text: &str) -> Result<CompoundQuery> {
    match compiler.compile(text)? {
        Compiled::Query { query, .. } => Ok(query),
        other => anyhow::bail!("expected a query, got {other:?}"),
    }
}

#[test]
fn taxon_macros_expand_to_their_subject() -> Result<()> {
    let compiler = Compiler::default();
    for (keyword, taxon) in [
        ("birds", "aves"),
        ("herps", "herptiles"),
        ("mammals", "mammalia"),
        ("insects", "insecta"),
        ("spiders", "araneae"),
        ("plants", "plantae"),
        ("lichens", "lecanoromycetes"),
        ("mosses", "bryophyta"),
    ] {
        assert_eq!(canonical(&compiler, keyword)?, format!("--of {taxon}"));
    }
    Ok(())
}

#[test]
fn the_last_macro_in_a_category_wins() -> Result<()> {
    let mut macros = MacroTable::builtin();
    macros.insert("alice", Macro::user("alice"));
    macros.insert("bob", Macro::user("bob"));
    let compiler = Compiler::new(macros, LexerConfig::default());

    let stream = canonical(&compiler, "alice bob")?;
    assert_eq!(stream, "--by bob");
    assert_eq!(stream.matches("--by").count(), 1);
    Ok(())
}

#[test]
fn a_later_macro_overrides_an_explicit_flag() -> Result<()> {
    let compiler = Compiler::default();
    assert_eq!(canonical(&compiler, "--by someone my")?, "--by someone --by me");
    assert_eq!(query(&compiler, "--by someone my")?.user.as_deref(), Some("me"));
    Ok(())
}

#[test]
fn leading_words_start_the_subject() -> Result<()> {
    let compiler = Compiler::new(MacroTable::new(), LexerConfig::default());
    assert_eq!(canonical(&compiler, "birds")?, "--of birds");
    assert_eq!(canonical(&compiler, "birds by me")?, "--of birds --by me");
    Ok(())
}

#[test]
fn multi_word_keywords_are_glued() {
    assert_eq!(normalize("fish not by me"), "fish not-by me");
    assert_eq!(normalize("fish id by me"), "fish id-by me");
    assert_eq!(normalize("fish in prj x"), "fish in-prj x");
    assert_eq!(normalize("fish added since may"), "fish added-since may");
}

#[test]
fn a_full_sentence_binds_every_part() -> Result<()> {
    let compiler = Compiler::default();
    let query = query(
        &compiler,
        r#"rg "great blue heron" in ardeidae from home not by me opt month=5"#,
    )?;

    let main = query.main.clone().unwrap_or_default();
    assert_eq!(main.phrases, vec![vec!["great", "blue", "heron"]]);
    assert_eq!(query.ancestor.map(|q| q.terms), Some(vec!["ardeidae".to_string()]));
    assert_eq!(query.place.as_deref(), Some("home"));
    assert_eq!(query.unobserved_by.as_deref(), Some("me"));
    assert_eq!(query.options, vec!["quality_grade=research", "month=5"]);
    Ok(())
}

#[test]
fn custom_macros_load_from_json() -> Result<()> {
    let mut macros = MacroTable::builtin();
    macros.extend(MacroTable::from_json(
        r#"{"frogs": {"of": "anura"}, "mine": {"by": "me", "opt": ["order=asc"]}}"#,
    )?);
    let compiler = Compiler::new(macros, LexerConfig::default());
    assert_eq!(
        canonical(&compiler, "frogs mine")?,
        "--opt order=asc --by me --of anura"
    );
    Ok(())
}

#[test]
fn errors_are_specific() {
    let compiler = Compiler::default();
    assert!(matches!(compiler.compile("\"fish"), Err(QueryError::Syntax(_))));
    assert!(matches!(
        compiler.compile("fish with life"),
        Err(QueryError::MissingValue { .. })
    ));
    assert!(matches!(
        compiler.compile("order x in family corvidae"),
        Err(QueryError::IncompatibleRanks { .. })
    ));
}
