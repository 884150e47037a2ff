mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use naturalist_query::{Compiled, Compiler, LexerConfig, MacroTable};
use naturalist_taxa::{CandidateList, Resolver, TaxonRecord};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Command, NaturalistCli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = NaturalistCli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let compiler = compiler(&cli).await?;

    match cli.command {
        Command::Compile { query } => {
            let compiled = compiler.compile(&query.join(" "))?;
            println!("{}", serde_json::to_string_pretty(&compiled)?);
        }
        Command::Match {
            candidates,
            ancestor_candidates,
            query,
        } => {
            let compiled = compiler.compile(&query.join(" "))?;
            let Compiled::Query { query, .. } = compiled else {
                anyhow::bail!("observation links have no taxon to match");
            };

            let mut search = CandidateList::new(read_records(&candidates).await?);
            if let (Some(path), Some(ancestor)) = (ancestor_candidates, &query.ancestor) {
                search = search.with_results_for(ancestor, read_records(&path).await?);
            }

            let found = Resolver::new(search).resolve_compound(&query).await?;
            if found.is_none() {
                tracing::info!("query names no taxon");
            }
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
    }

    Ok(())
}

async fn compiler(cli: &NaturalistCli) -> Result<Compiler> {
    let mut macros = MacroTable::builtin();
    if let Some(path) = &cli.macros {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading macros from {}", path.display()))?;
        macros.extend(MacroTable::from_json(&json)?);
    }
    let config = LexerConfig::new().with_rank_keywords(cli.expand_ranks);
    Ok(Compiler::new(macros, config))
}

async fn read_records(path: &std::path::Path) -> Result<Vec<TaxonRecord>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading candidates from {}", path.display()))?;
    Ok(TaxonRecord::from_results(&json)?)
}
