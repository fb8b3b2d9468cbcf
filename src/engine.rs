//! # Curation Engine
//!
//! Turns an abstract request (a mood, a genre, an artist, or a set of seed
//! tracks) into a bounded list of [`TrackSummary`] values by combining catalog
//! queries with [`profile`] matching and [`aggregate`] averaging.
//!
//! ## Failure policy
//!
//! The engine distinguishes two kinds of failure:
//!
//! - **Validation errors** (unknown mood, missing input) are returned as
//!   [`CurationError`] before any catalog call is made.
//! - **Upstream errors** inside a generation pipeline are logged and folded
//!   into a best-effort [`Curation`]. The mood pipeline keeps whatever it had
//!   matched before the failure; the genre, artist and seed pipelines return an
//!   empty list. Nothing is retried.
//!
//! Playlist analysis reports through [`AnalysisError`] instead.
//!
//! ## Example
//!
//! ```no_run
//! use curator::config::RuntimeConfig;
//! use curator::engine::CurationEngine;
//! use curator::spotify::SpotifyCatalog;
//!
//! let catalog = SpotifyCatalog::new(&RuntimeConfig::load()?)?;
//! let engine = CurationEngine::new(catalog);
//!
//! let curation = engine.generate_mood_playlist("workout", 20)?;
//! for track in &curation.tracks {
//!     println!("{} - {}", track.artist, track.name);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::aggregate::{self, AggregateDescriptor, MoodLabel};
use crate::catalog::{Catalog, CatalogError, TargetFeatures};
use crate::error::{AnalysisError, CurationError};
use crate::profile::{self, RangeProfile};
use crate::track::{DescriptorVector, TrackSummary};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

/// Broad query used to gather mood candidates.
pub const MOOD_CANDIDATE_QUERY: &str = "year:2020-2024 popularity:50-100";

/// Candidates scanned by the mood pipeline, independent of the requested limit.
pub const MOOD_CANDIDATE_POOL: usize = 50;

/// The recommendation service accepts at most this many seeds.
pub const MAX_SEED_TRACKS: usize = 5;

/// Related artists consulted by the artist pipeline.
pub const RELATED_ARTIST_COUNT: usize = 3;

pub const DEFAULT_LIMIT: usize = 20;

/// Outcome of a generation pipeline.
///
/// `upstream_error` is set when a catalog failure cut the pipeline short; the
/// tracks are then whatever that pipeline keeps on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Curation {
    pub tracks: Vec<TrackSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_error: Option<String>,
}

impl Curation {
    #[must_use]
    pub fn complete(tracks: Vec<TrackSummary>) -> Self {
        Self {
            tracks,
            upstream_error: None,
        }
    }

    #[must_use]
    pub fn interrupted(tracks: Vec<TrackSummary>, error: &CatalogError) -> Self {
        Self {
            tracks,
            upstream_error: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.upstream_error.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Summary of an existing playlist's audio character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistAnalysis {
    /// Tracks that had descriptors
    pub track_count: usize,
    pub average_features: AggregateDescriptor,
    pub mood: MoodLabel,
    pub playlist_name: String,
}

/// What a consumer may ask the engine to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlaylistMode {
    Mood {
        mood: String,
    },
    Genre {
        genre: String,
    },
    Artist {
        artist: String,
        #[serde(default = "include_related_default")]
        include_related: bool,
    },
    Smart {
        seed_tracks: Vec<String>,
    },
}

const fn include_related_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRequest {
    #[serde(flatten)]
    pub mode: PlaylistMode,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

const fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// Stateless curation engine; owns only the catalog handle.
pub struct CurationEngine<C: Catalog> {
    catalog: C,
}

impl<C: Catalog> CurationEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Route a request to the matching pipeline.
    ///
    /// # Errors
    ///
    /// Validation errors of the selected pipeline.
    pub fn generate(&self, request: &PlaylistRequest) -> Result<Curation, CurationError> {
        let limit = request.limit;
        match &request.mode {
            PlaylistMode::Mood { mood } => self.generate_mood_playlist(mood, limit),
            PlaylistMode::Genre { genre } => Ok(self.generate_genre_playlist(genre, limit)),
            PlaylistMode::Artist {
                artist,
                include_related,
            } => Ok(self.generate_artist_playlist(artist, *include_related, limit)),
            PlaylistMode::Smart { seed_tracks } => Ok(self.generate_smart_playlist(seed_tracks, limit)),
        }
    }

    /// Tracks whose descriptors fall inside the named mood profile.
    ///
    /// Scans a fixed pool of candidates in catalog order, fetching each
    /// candidate's descriptor individually, and stops as soon as `limit`
    /// matches are found. Candidates past that point are never looked up, so
    /// the result is the first matches rather than the best ones.
    ///
    /// # Errors
    ///
    /// [`CurationError::UnknownMood`] if `mood` is not in the profile table.
    pub fn generate_mood_playlist(&self, mood: &str, limit: usize) -> Result<Curation, CurationError> {
        let profile = profile::lookup_mood(mood)?;
        info!("Generating '{mood}' playlist with up to {limit} tracks");

        let mut matched = Vec::new();
        match self.scan_mood_candidates(profile, limit, &mut matched) {
            Ok(()) => {
                info!("Mood '{mood}' matched {} tracks", matched.len());
                Ok(Curation::complete(matched))
            }
            Err(e) => {
                error!("Error searching by audio features: {e}");
                Ok(Curation::interrupted(matched, &e))
            }
        }
    }

    fn scan_mood_candidates(
        &self,
        profile: &RangeProfile,
        limit: usize,
        matched: &mut Vec<TrackSummary>,
    ) -> Result<(), CatalogError> {
        if limit == 0 {
            return Ok(());
        }

        let candidates = self.catalog.search_tracks(MOOD_CANDIDATE_QUERY, MOOD_CANDIDATE_POOL)?;
        debug!("Scanning {} mood candidates", candidates.len());

        for candidate in candidates {
            let Some(descriptor) = self.catalog.descriptor(&candidate.id)? else {
                debug!("No descriptor for '{}', skipping", candidate.id);
                continue;
            };

            if profile::matches(&descriptor, profile) {
                debug!("'{}' matches profile", candidate.name);
                matched.push(candidate.with_descriptor(descriptor));
                if matched.len() >= limit {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Tracks from a single genre-scoped search, unfiltered.
    pub fn generate_genre_playlist(&self, genre: &str, limit: usize) -> Curation {
        let query = format!("genre:\"{genre}\"");
        match self.catalog.search_tracks(&query, limit) {
            Ok(mut tracks) => {
                tracks.truncate(limit);
                info!("Genre '{genre}' returned {} tracks", tracks.len());
                Curation::complete(tracks)
            }
            Err(e) => {
                error!("Error generating genre playlist: {e}");
                Curation::interrupted(Vec::new(), &e)
            }
        }
    }

    /// Top tracks of the best-matching artist, optionally topped up from
    /// related artists.
    ///
    /// With related artists enabled the main artist contributes `limit / 2`
    /// tracks. Each of the top three related artists then contributes
    /// `remaining / 3` tracks, where `remaining` is the budget left when that
    /// artist is reached, so the final list usually comes out shorter than
    /// `limit` (20 yields 10 + 3 + 2 + 1). An unknown artist yields an empty
    /// list; any upstream failure discards everything collected so far.
    pub fn generate_artist_playlist(&self, artist_name: &str, include_related: bool, limit: usize) -> Curation {
        match self.collect_artist_tracks(artist_name, include_related, limit) {
            Ok(tracks) => {
                info!("Artist '{artist_name}' playlist has {} tracks", tracks.len());
                Curation::complete(tracks)
            }
            Err(e) => {
                error!("Error generating artist playlist: {e}");
                Curation::interrupted(Vec::new(), &e)
            }
        }
    }

    fn collect_artist_tracks(
        &self,
        artist_name: &str,
        include_related: bool,
        limit: usize,
    ) -> Result<Vec<TrackSummary>, CatalogError> {
        let Some(artist) = self.catalog.search_artists(artist_name, 1)?.into_iter().next() else {
            info!("No artist found for '{artist_name}'");
            return Ok(Vec::new());
        };
        debug!("Resolved '{artist_name}' to artist {}", artist.id);

        let own_share = if include_related { limit / 2 } else { limit };
        let mut tracks: Vec<TrackSummary> = self
            .catalog
            .artist_top_tracks(&artist.id)?
            .into_iter()
            .take(own_share)
            .collect();

        if include_related && tracks.len() < limit {
            let related = self.catalog.related_artists(&artist.id)?;
            let mut remaining = limit - tracks.len();

            for related_artist in related.iter().take(RELATED_ARTIST_COUNT) {
                if remaining == 0 {
                    break;
                }
                // Fixed for this artist; not re-divided as `remaining` shrinks.
                let per_artist = remaining / 3;
                debug!("Adding up to {per_artist} tracks from related artist {}", related_artist.name);

                let top = self.catalog.artist_top_tracks(&related_artist.id)?;
                for track in top.into_iter().take(per_artist) {
                    tracks.push(track);
                    remaining = remaining.saturating_sub(1);
                }
            }
        }

        tracks.truncate(limit);
        Ok(tracks)
    }

    /// Recommendations steered toward the seeds' average valence, energy,
    /// danceability and tempo.
    ///
    /// Descriptors are fetched for every seed, but only the first
    /// [`MAX_SEED_TRACKS`] are passed on as recommendation seeds. If the seeds'
    /// average lacks any of the four targets, no recommendation is requested
    /// and the result is empty.
    pub fn generate_smart_playlist(&self, seed_tracks: &[String], limit: usize) -> Curation {
        if seed_tracks.is_empty() {
            warn!("Smart playlist requested without seed tracks");
            return Curation::default();
        }

        match self.recommend_from_seeds(seed_tracks, limit) {
            Ok(tracks) => {
                info!("Recommendation returned {} tracks", tracks.len());
                Curation::complete(tracks)
            }
            Err(e) => {
                error!("Error generating smart playlist: {e}");
                Curation::interrupted(Vec::new(), &e)
            }
        }
    }

    fn recommend_from_seeds(&self, seed_tracks: &[String], limit: usize) -> Result<Vec<TrackSummary>, CatalogError> {
        let descriptors = self.catalog.descriptors(seed_tracks)?;
        let averages = aggregate::average(&descriptors);

        let Some(targets) = TargetFeatures::from_aggregate(&averages) else {
            warn!("Seed tracks lack valence, energy, danceability or tempo; no recommendations requested");
            return Ok(Vec::new());
        };
        debug!("Recommendation targets: {targets:?}");

        let seeds = &seed_tracks[..seed_tracks.len().min(MAX_SEED_TRACKS)];
        let mut tracks = self.catalog.recommend(seeds, &targets, limit)?;
        tracks.truncate(limit);
        Ok(tracks)
    }

    /// Average descriptors of an existing playlist and classify its mood.
    ///
    /// # Errors
    ///
    /// One of the named [`AnalysisError`] payloads; catalog failures become
    /// [`AnalysisError::Upstream`] carrying the underlying message.
    pub fn analyze_playlist_features(&self, playlist_id: &str) -> Result<PlaylistAnalysis, AnalysisError> {
        if playlist_id.trim().is_empty() {
            return Err(AnalysisError::MissingPlaylistId);
        }

        self.analyze(playlist_id).map_err(|e| match e {
            AnalysisFailure::Named(named) => named,
            AnalysisFailure::Catalog(e) => {
                error!("Error analyzing playlist: {e}");
                AnalysisError::Upstream(e.to_string())
            }
        })
    }

    fn analyze(&self, playlist_id: &str) -> Result<PlaylistAnalysis, AnalysisFailure> {
        let playlist = self.catalog.playlist(playlist_id)?;
        if playlist.items.is_empty() {
            return Err(AnalysisError::EmptyPlaylist.into());
        }

        let track_ids: Vec<String> = playlist
            .items
            .into_iter()
            .filter_map(|item| item.track_id)
            .collect();
        if track_ids.is_empty() {
            return Err(AnalysisError::NoValidTracks.into());
        }

        let descriptors: Vec<Option<DescriptorVector>> = self
            .catalog
            .descriptors(&track_ids)?
            .into_iter()
            .filter(Option::is_some)
            .collect();
        if descriptors.is_empty() {
            return Err(AnalysisError::NoAudioFeatures.into());
        }

        let average_features = aggregate::average(&descriptors);
        let mood = aggregate::classify_mood(&average_features);
        info!("Playlist '{}' classified as {mood}", playlist.name);

        Ok(PlaylistAnalysis {
            track_count: descriptors.len(),
            average_features,
            mood,
            playlist_name: playlist.name,
        })
    }

    /// Plain track search.
    ///
    /// # Errors
    ///
    /// [`CurationError::MissingInput`] for a blank query.
    pub fn search_tracks(&self, query: &str, limit: usize) -> Result<Curation, CurationError> {
        if query.trim().is_empty() {
            return Err(CurationError::MissingInput("query"));
        }

        Ok(match self.catalog.search_tracks(query, limit) {
            Ok(mut tracks) => {
                tracks.truncate(limit);
                Curation::complete(tracks)
            }
            Err(e) => {
                error!("Error searching tracks: {e}");
                Curation::interrupted(Vec::new(), &e)
            }
        })
    }

    /// Raw descriptor lookup, aligned with `track_ids`.
    ///
    /// # Errors
    ///
    /// Fails with `MissingInput` for an empty id list; catalog failures are
    /// passed through unchanged.
    pub fn audio_features(&self, track_ids: &[String]) -> anyhow::Result<Vec<Option<DescriptorVector>>> {
        if track_ids.is_empty() {
            return Err(CurationError::MissingInput("track_ids").into());
        }
        Ok(self.catalog.descriptors(track_ids)?)
    }

    #[must_use]
    pub fn available_moods(&self) -> Vec<&'static str> {
        profile::mood_names()
    }
}

enum AnalysisFailure {
    Named(AnalysisError),
    Catalog(CatalogError),
}

impl From<AnalysisError> for AnalysisFailure {
    fn from(e: AnalysisError) -> Self {
        Self::Named(e)
    }
}

impl From<CatalogError> for AnalysisFailure {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}
