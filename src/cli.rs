//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Curator using Clap derive
//! macros. Every generation command maps onto one curation engine entry point.
//!
//! ## Commands
//!
//! - `mood`: Tracks matching a mood profile (happy, sad, energetic, calm, party, workout)
//! - `genre`: Tracks from a genre-scoped search
//! - `artist`: An artist's top tracks, optionally with related artists
//! - `smart`: Recommendations steered by seed tracks' audio features
//! - `analyze`: Average audio features and mood of an existing playlist
//!
//! ## Examples
//!
//! ```bash
//! curator mood workout -n 25
//! curator artist "Daft Punk" --no-related
//! curator --json analyze 37i9dQZF1DXcBWIGoYBM5M
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser)]
#[command(name = "curator")]
#[command(about = "Curator: mood, genre, artist and seed-based playlist curation")]
#[command(version)]
pub struct Args {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Catalog access token (overrides config file and environment)
    #[arg(long, global = true, env = "CURATOR_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging when RUST_LOG is not set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a playlist matching a mood
    ///
    /// Scans a broad pool of popular recent tracks and keeps the first ones
    /// whose valence, energy, danceability and tempo fall inside the mood's
    /// ranges.
    Mood {
        /// Mood name (case-insensitive): happy, sad, energetic, calm, party, workout
        #[arg(value_hint = clap::ValueHint::Other)]
        mood: String,

        /// Number of tracks to generate
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Generate a playlist from a genre
    Genre {
        /// Genre name, e.g. "synthwave"
        genre: String,

        /// Number of tracks to generate
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Generate a playlist around an artist
    ///
    /// Takes half the tracks from the artist's top tracks and tops up from
    /// up to three related artists.
    Artist {
        /// Artist name; the best catalog match is used
        name: String,

        /// Only use the artist's own top tracks
        #[arg(long)]
        no_related: bool,

        /// Number of tracks to generate
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Generate recommendations from seed tracks
    ///
    /// Averages the seeds' audio features and asks the catalog for tracks
    /// close to them. Only the first five seeds are sent as seeds.
    Smart {
        /// Seed track IDs
        #[arg(required = true)]
        seeds: Vec<String>,

        /// Number of tracks to generate
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Analyze an existing playlist's audio features and mood
    Analyze {
        /// Playlist ID
        playlist_id: String,
    },

    /// Search the catalog for tracks
    Search {
        /// Free-text query
        query: String,

        /// Number of tracks to return
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show raw audio features for tracks
    Features {
        /// Track IDs
        #[arg(required = true)]
        track_ids: Vec<String>,
    },

    /// List available moods and their feature ranges
    Moods,

    /// Generate shell completions
    ///
    /// Usage: curator completion bash > ~/.local/share/bash-completion/completions/curator
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Generate enhanced completion with mood name completion
    ///
    /// Usage: curator completion-enhanced fish > ~/.config/fish/completions/curator.fish
    CompletionEnhanced {
        /// Shell to generate enhanced completions for (currently bash and fish supported)
        shell: Shell,
    },

    /// List mood names for completion (hidden command)
    #[command(hide = true)]
    CompleteMoods,
}
