//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "teller")]
#[command(about = "Teller - Banking consultation retrieval engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize Teller configuration and a sample corpus
    Init {
        /// Overwrite existing configuration and corpus files
        #[arg(short, long)]
        force: bool,
    },

    /// Rebuild the vector index from the corpus file
    Reload,

    /// Ask a question against the indexed corpus
    Ask {
        /// The question text (positional argument)
        question: String,

        /// Maximum number of matches to return
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show store and index status
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_with_limit() {
        let cli = Cli::try_parse_from(["teller", "ask", "how to get a loan", "--limit", "5"])
            .expect("should parse");

        match cli.command {
            Commands::Ask { question, limit } => {
                assert_eq!(question, "how to get a loan");
                assert_eq!(limit, Some(5));
            }
            _ => panic!("Expected ask command"),
        }
    }

    #[test]
    fn test_parse_global_json_flag() {
        let cli = Cli::try_parse_from(["teller", "status", "--json"]).expect("should parse");
        assert!(cli.json);
    }
}
