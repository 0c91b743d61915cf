//! CLI command implementations

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::CompletionConfig;
use crate::text::extract_words;
use crate::vocabulary::VocabularyManager;

use super::args::{Commands, EngineArgs};

/// Execute a CLI command
pub fn execute(command: Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Complete {
            prefix,
            engine,
            show_distances,
        } => cmd_complete(&prefix, &engine, config_path, show_distances),
        Commands::Search {
            query,
            engine,
            show_distances,
        } => cmd_search(&query, &engine, config_path, show_distances),
        Commands::Stats { engine } => cmd_stats(&engine, config_path),
        Commands::Words { sources } => cmd_words(&sources),
    }
}

/// Complete command
fn cmd_complete(
    prefix: &str,
    engine: &EngineArgs,
    config_path: Option<&Path>,
    show_distances: bool,
) -> Result<()> {
    let manager = build_manager(engine, config_path)?;
    let completions = manager.complete_default(prefix);

    if completions.is_empty() {
        println!("{}", "No completions found".yellow());
        return Ok(());
    }

    for completion in &completions {
        if show_distances {
            println!(
                "{} ({}, d={})",
                completion.term.green(),
                completion.kind,
                completion.distance
            );
        } else {
            println!("{}", completion.term.green());
        }
    }
    Ok(())
}

/// Search command
fn cmd_search(
    query: &str,
    engine: &EngineArgs,
    config_path: Option<&Path>,
    show_distances: bool,
) -> Result<()> {
    let manager = build_manager(engine, config_path)?;
    let results = manager.search_candidates(query, manager.config().max_results);

    if results.is_empty() {
        println!("{}", "No matches found".yellow());
        return Ok(());
    }

    for (i, candidate) in results.iter().enumerate() {
        if show_distances {
            println!("   {}. {} (d={})", i + 1, candidate.term.green(), candidate.distance);
        } else {
            println!("   {}. {}", i + 1, candidate.term.green());
        }
    }
    println!();
    println!("{} match(es) found", results.len());
    Ok(())
}

/// Stats command
fn cmd_stats(engine: &EngineArgs, config_path: Option<&Path>) -> Result<()> {
    let manager = build_manager(engine, config_path)?;
    let stats = manager.stats();
    let config = manager.config();

    println!("{}", "Vocabulary Statistics".bold().underline());
    println!("  Sources:    {}", engine.sources.len().to_string().green());
    println!("  Words:      {}", stats.word_count.to_string().green());
    println!("  Tree size:  {}", stats.tree_size.to_string().green());
    println!(
        "  Nodes:      {}",
        manager.snapshot().tree().node_count().to_string().green()
    );
    println!(
        "  Case:       {}",
        if config.case_insensitive {
            "insensitive"
        } else {
            "sensitive"
        }
    );
    println!(
        "  Fuzzy:      {}",
        if config.fuzzy_matching {
            format!("on (max distance {})", config.fuzzy_distance)
        } else {
            "off".to_string()
        }
    );
    Ok(())
}

/// Words command
fn cmd_words(sources: &[PathBuf]) -> Result<()> {
    for word in harvest(sources)? {
        println!("{}", word);
    }
    Ok(())
}

/// Load the configuration file (if any), apply overrides and build the engine.
pub fn build_manager(engine: &EngineArgs, config_path: Option<&Path>) -> Result<VocabularyManager> {
    let base = match config_path {
        Some(path) => load_config(path)?,
        None => CompletionConfig::default(),
    };
    let config = engine.apply(base);
    let manager = VocabularyManager::with_config(config).context("Invalid configuration")?;

    manager.rebuild(harvest(&engine.sources)?);
    Ok(manager)
}

/// Read and validate a JSON configuration file.
pub fn load_config(path: &Path) -> Result<CompletionConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    CompletionConfig::from_json_str(&json)
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// Extract the combined word set of every source file.
pub fn harvest(sources: &[PathBuf]) -> Result<BTreeSet<String>> {
    if sources.is_empty() {
        bail!("No source files given");
    }

    let mut words = BTreeSet::new();
    for path in sources {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let extracted = extract_words(&text);
        debug!(path = %path.display(), words = extracted.len(), "harvested source");
        words.extend(extracted);
    }
    Ok(words)
}
