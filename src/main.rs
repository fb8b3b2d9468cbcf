//! # Curator - Playlist Curation
//!
//! Curator builds playlists by querying a remote music catalog and filtering
//! or combining the results by mood, genre, artist affinity or seed-track
//! similarity.
//!
//! ## Usage
//!
//! ```bash
//! # Mood playlists
//! curator mood happy -n 15
//!
//! # Artist with related artists
//! curator artist "Phoebe Bridgers"
//!
//! # Recommendations from seeds
//! curator smart 4uLU6hMCjMI75M1A2tKUQC 1301WleyT98MSxVHPZCA6M
//!
//! # Analyze an existing playlist
//! curator --json analyze 37i9dQZF1DXcBWIGoYBM5M
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use curator::cli::{self, Command};
use curator::config::{self, RuntimeConfig};
use curator::engine::{Curation, CurationEngine};
use curator::spotify::SpotifyCatalog;
use curator::{completion, output, profile};
use log::{debug, info};
use std::path::Path;

/// Main entry point for the Curator application.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the curation engine.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug curator mood happy` - Enable debug logging
/// - `RUST_LOG=curator::engine=debug curator artist Bjork` - Module-specific logging
fn main() -> Result<()> {
    let cli::Args {
        json,
        token,
        config,
        verbose,
        command,
    } = cli::Args::parse();

    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    // The catalog client is only built for commands that talk to the catalog
    let connect = || -> Result<(CurationEngine<SpotifyCatalog>, usize)> {
        let config = load_config(config.as_deref(), token.as_deref())?;
        let catalog = SpotifyCatalog::new(&config).context("Cannot create catalog client")?;
        Ok((CurationEngine::new(catalog), config.default_limit))
    };

    match command {
        Command::Mood { mood, limit } => {
            let (engine, default_limit) = connect()?;
            info!("Generating mood playlist: {mood}");
            let curation = engine.generate_mood_playlist(&mood, limit.unwrap_or(default_limit))?;
            emit(&format!("Mood '{mood}'"), &curation, json)?;
        }
        Command::Genre { genre, limit } => {
            let (engine, default_limit) = connect()?;
            let curation = engine.generate_genre_playlist(&genre, limit.unwrap_or(default_limit));
            emit(&format!("Genre '{genre}'"), &curation, json)?;
        }
        Command::Artist { name, no_related, limit } => {
            let (engine, default_limit) = connect()?;
            let curation = engine.generate_artist_playlist(&name, !no_related, limit.unwrap_or(default_limit));
            emit(&format!("Artist '{name}'"), &curation, json)?;
        }
        Command::Smart { seeds, limit } => {
            let (engine, default_limit) = connect()?;
            let curation = engine.generate_smart_playlist(&seeds, limit.unwrap_or(default_limit));
            emit("Recommendations", &curation, json)?;
        }
        Command::Analyze { playlist_id } => {
            let (engine, _) = connect()?;
            match engine.analyze_playlist_features(&playlist_id) {
                Ok(analysis) if json => output::print_json(&analysis)?,
                Ok(analysis) => output::print_analysis(&analysis),
                Err(e) => {
                    if json {
                        output::print_json(&e)?;
                    }
                    return Err(e).context("Playlist analysis failed");
                }
            }
        }
        Command::Search { query, limit } => {
            let (engine, default_limit) = connect()?;
            let curation = engine.search_tracks(&query, limit.unwrap_or(default_limit))?;
            emit(&format!("Search '{query}'"), &curation, json)?;
        }
        Command::Features { track_ids } => {
            let (engine, _) = connect()?;
            let descriptors = engine.audio_features(&track_ids)?;
            if json {
                output::print_json(&descriptors)?;
            } else {
                output::print_features(&track_ids, &descriptors);
            }
        }
        Command::Moods => {
            if json {
                output::print_json(&*profile::MOOD_PROFILES)?;
            } else {
                output::print_moods(&profile::MOOD_PROFILES);
            }
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
        Command::CompletionEnhanced { shell } => match shell {
            cli::Shell::Bash => print!("{}", completion::enhanced_bash_completion()),
            cli::Shell::Fish => print!("{}", completion::enhanced_fish_completion()),
            _ => return Err(anyhow::anyhow!("Enhanced completions only supported for bash and fish")),
        },
        Command::CompleteMoods => completion::print_mood_completions(),
    }

    Ok(())
}

/// Resolve configuration: file (explicit or default location), environment,
/// then the `--token` flag.
fn load_config(path: Option<&Path>, token: Option<&str>) -> Result<RuntimeConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::get_config_path()?,
    };
    let mut config = RuntimeConfig::load_from(&path)?;

    if let Some(token) = token {
        config = config.with_access_token(token);
    }
    debug!("Using catalog at {}", config.api_base_url);
    Ok(config)
}

fn emit(title: &str, curation: &Curation, json: bool) -> Result<()> {
    if json {
        output::print_json(curation)
    } else {
        output::print_curation(title, curation);
        Ok(())
    }
}
