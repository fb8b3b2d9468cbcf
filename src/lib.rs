//! Playlist curation over a remote music catalog.
//!
//! Core modules:
//! - [`engine`] - Curation pipelines (mood, genre, artist, seed) and playlist analysis
//! - [`profile`] - Mood range profiles and profile matching
//! - [`aggregate`] - Descriptor averaging and mood classification
//! - [`catalog`] - The catalog trait the engine is written against
//! - [`spotify`] - Spotify Web API catalog client
//!
//! ### Supporting Modules
//!
//! - [`track`] - Track, artist, descriptor and playlist values
//! - [`error`] - Validation and analysis error types
//! - [`config`] - Configuration file and environment handling
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`output`] - Terminal rendering of results
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use curator::config::RuntimeConfig;
//! use curator::engine::CurationEngine;
//! use curator::spotify::SpotifyCatalog;
//!
//! let config = RuntimeConfig::load()?;
//! let engine = CurationEngine::new(SpotifyCatalog::new(&config)?);
//!
//! // Mood playlists validate the mood name up front
//! let party = engine.generate_mood_playlist("Party", 15)?;
//! println!("{} party tracks", party.len());
//!
//! // The other pipelines never fail; check whether the catalog cut them short
//! let related = engine.generate_artist_playlist("Khruangbin", true, 20);
//! if !related.is_complete() {
//!     eprintln!("partial result: {:?}", related.upstream_error);
//! }
//!
//! match engine.analyze_playlist_features("37i9dQZF1DXcBWIGoYBM5M") {
//!     Ok(analysis) => println!("{} feels {}", analysis.playlist_name, analysis.mood),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Matching and Aggregation
//!
//! Mood profiles are closed intervals over valence, energy, danceability and
//! tempo. A track matches when every feature it actually has lies inside the
//! interval; missing features are skipped. Averages are taken per feature over
//! the tracks that carry that feature as a number.
//!
//! ## Error Handling
//!
//! - Invalid requests return [`error::CurationError`]
//! - Catalog failures inside generation pipelines are logged and reported on
//!   the returned [`engine::Curation`] instead of as errors
//! - Playlist analysis returns [`error::AnalysisError`] payloads

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod profile;
pub mod spotify;
pub mod track;
