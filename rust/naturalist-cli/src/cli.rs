use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "naturalist")]
#[command(bin_name = "naturalist")]
#[command(about = "Compile natural language observation queries", long_about = None)]
pub struct NaturalistCli {
    /// JSON file of extra macros, keyed by keyword
    #[arg(long, global = true)]
    pub macros: Option<PathBuf>,

    /// Treat bare rank words as `--rank` values
    #[arg(long, global = true)]
    pub expand_ranks: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the canonical form and the bound query
    Compile {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Pick the query's taxon from saved search results
    Match {
        /// Search results for the subject (array or `{"results": [...]}`)
        #[arg(long)]
        candidates: PathBuf,

        /// Search results for the `in` ancestor
        #[arg(long)]
        ancestor_candidates: Option<PathBuf>,

        #[arg(required = true)]
        query: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn it_has_a_consistent_definition() {
        NaturalistCli::command().debug_assert();
    }

    #[test]
    fn it_parses_match_arguments() {
        let cli = NaturalistCli::parse_from([
            "naturalist",
            "--expand-ranks",
            "match",
            "--candidates",
            "results.json",
            "raven",
            "in",
            "corvidae",
        ]);
        assert!(cli.expand_ranks);
        match cli.command {
            Command::Match {
                candidates, query, ..
            } => {
                assert_eq!(candidates, PathBuf::from("results.json"));
                assert_eq!(query, vec!["raven", "in", "corvidae"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
