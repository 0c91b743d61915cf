//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CompletionConfig;

/// Top-level command line.
#[derive(Parser)]
#[command(name = "libcompletion")]
#[command(about = "Prefix and fuzzy word completion over text files")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file (camelCase keys, missing keys use defaults)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Rank completions for a partially typed word
    Complete {
        /// Partially typed word
        prefix: String,

        #[command(flatten)]
        engine: EngineArgs,

        /// Show match kind and distance
        #[arg(short = 's', long)]
        show_distances: bool,
    },

    /// Run a combined exact-prefix and fuzzy search
    Search {
        /// Query term
        query: String,

        #[command(flatten)]
        engine: EngineArgs,

        /// Show distances
        #[arg(short = 's', long)]
        show_distances: bool,
    },

    /// Display vocabulary statistics
    Stats {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Print the words extracted from the sources
    Words {
        /// Text files to harvest words from
        #[arg(long = "source", required = true, num_args = 1..)]
        sources: Vec<PathBuf>,
    },
}

/// Options shared by every command that builds a vocabulary.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Text files to harvest words from
    #[arg(long = "source", required = true, num_args = 1..)]
    pub sources: Vec<PathBuf>,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Match casing exactly
    #[arg(long)]
    pub case_sensitive: bool,

    /// Disable fuzzy matching
    #[arg(long)]
    pub no_fuzzy: bool,

    /// Minimum word length accepted into the vocabulary
    #[arg(long)]
    pub min_word_length: Option<usize>,

    /// Edit-distance budget for fuzzy matches
    #[arg(short = 'm', long)]
    pub max_distance: Option<usize>,
}

impl EngineArgs {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, mut config: CompletionConfig) -> CompletionConfig {
        if let Some(max) = self.max_results {
            config.max_results = max;
        }
        if let Some(len) = self.min_word_length {
            config.min_word_length = len;
        }
        if let Some(distance) = self.max_distance {
            config.fuzzy_distance = distance;
        }
        if self.case_sensitive {
            config.case_insensitive = false;
        }
        if self.no_fuzzy {
            config.fuzzy_matching = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete() {
        let cli = Cli::try_parse_from([
            "libcompletion",
            "complete",
            "fun",
            "--source",
            "a.txt",
            "b.txt",
            "--max-results",
            "5",
            "--no-fuzzy",
        ])
        .unwrap();

        match cli.command {
            Commands::Complete { prefix, engine, show_distances } => {
                assert_eq!(prefix, "fun");
                assert_eq!(engine.sources.len(), 2);
                assert_eq!(engine.max_results, Some(5));
                assert!(engine.no_fuzzy);
                assert!(!show_distances);
            }
            _ => panic!("expected complete"),
        }
    }

    #[test]
    fn test_source_is_required() {
        assert!(Cli::try_parse_from(["libcompletion", "stats"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let engine = EngineArgs {
            sources: vec![],
            max_results: Some(3),
            case_sensitive: true,
            no_fuzzy: true,
            min_word_length: Some(2),
            max_distance: Some(1),
        };
        let config = engine.apply(CompletionConfig::default());

        assert_eq!(config.max_results, 3);
        assert!(!config.case_insensitive);
        assert!(!config.fuzzy_matching);
        assert_eq!(config.min_word_length, 2);
        assert_eq!(config.fuzzy_distance, 1);
    }

    #[test]
    fn test_apply_keeps_config_when_unset() {
        let engine = EngineArgs {
            sources: vec![],
            max_results: None,
            case_sensitive: false,
            no_fuzzy: false,
            min_word_length: None,
            max_distance: None,
        };
        let base = CompletionConfig::builder().max_results(7).build().unwrap();
        assert_eq!(engine.apply(base.clone()), base);
    }
}
