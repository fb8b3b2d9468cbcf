//! # Catalog Seam
//!
//! The curation engine talks to the remote catalog/search/recommendation
//! service only through the [`Catalog`] trait. Calls are blocking and issued
//! one at a time; implementations hold no per-request state.
//!
//! [`crate::spotify::SpotifyCatalog`] is the production implementation. Tests
//! supply in-memory fakes.

use crate::aggregate::AggregateDescriptor;
use crate::track::{ArtistSummary, DescriptorVector, PlaylistContents, TrackSummary};
use serde::Serialize;
use thiserror::Error;

/// Upstream failure. Never retried.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Connection, timeout or TLS failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Catalog returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Malformed catalog response: {0}")]
    Malformed(String),

    #[error("No access token configured; set CURATOR_ACCESS_TOKEN or pass --token")]
    MissingCredentials,

    #[error("Invalid catalog base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Target descriptor values for a recommendation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetFeatures {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub tempo: f64,
}

impl TargetFeatures {
    /// Targets from an aggregate; `None` unless all four features are present.
    #[must_use]
    pub fn from_aggregate(aggregate: &AggregateDescriptor) -> Option<Self> {
        Some(Self {
            valence: aggregate.get("valence")?,
            energy: aggregate.get("energy")?,
            danceability: aggregate.get("danceability")?,
            tempo: aggregate.get("tempo")?,
        })
    }

    /// `(query parameter, value)` pairs for the recommendation endpoint.
    #[must_use]
    pub fn query_params(&self) -> [(&'static str, f64); 4] {
        [
            ("target_valence", self.valence),
            ("target_energy", self.energy),
            ("target_danceability", self.danceability),
            ("target_tempo", self.tempo),
        ]
    }
}

/// Read-only operations consumed from the external catalog.
pub trait Catalog {
    /// Free-text track search.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<TrackSummary>, CatalogError>;

    /// Free-text artist search, best match first.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    fn search_artists(&self, query: &str, limit: usize) -> Result<Vec<ArtistSummary>, CatalogError>;

    /// Descriptor of a single track; `None` when the catalog has none.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    fn descriptor(&self, track_id: &str) -> Result<Option<DescriptorVector>, CatalogError>;

    /// Descriptors for several tracks, aligned with `track_ids`.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    fn descriptors(&self, track_ids: &[String]) -> Result<Vec<Option<DescriptorVector>>, CatalogError>;

    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<TrackSummary>, CatalogError>;

    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    fn related_artists(&self, artist_id: &str) -> Result<Vec<ArtistSummary>, CatalogError>;

    /// Recommendations seeded by at most five tracks.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    fn recommend(
        &self,
        seed_track_ids: &[String],
        targets: &TargetFeatures,
        limit: usize,
    ) -> Result<Vec<TrackSummary>, CatalogError>;

    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    fn playlist(&self, playlist_id: &str) -> Result<PlaylistContents, CatalogError>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<TrackSummary>, CatalogError> {
        (**self).search_tracks(query, limit)
    }

    fn search_artists(&self, query: &str, limit: usize) -> Result<Vec<ArtistSummary>, CatalogError> {
        (**self).search_artists(query, limit)
    }

    fn descriptor(&self, track_id: &str) -> Result<Option<DescriptorVector>, CatalogError> {
        (**self).descriptor(track_id)
    }

    fn descriptors(&self, track_ids: &[String]) -> Result<Vec<Option<DescriptorVector>>, CatalogError> {
        (**self).descriptors(track_ids)
    }

    fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<TrackSummary>, CatalogError> {
        (**self).artist_top_tracks(artist_id)
    }

    fn related_artists(&self, artist_id: &str) -> Result<Vec<ArtistSummary>, CatalogError> {
        (**self).related_artists(artist_id)
    }

    fn recommend(
        &self,
        seed_track_ids: &[String],
        targets: &TargetFeatures,
        limit: usize,
    ) -> Result<Vec<TrackSummary>, CatalogError> {
        (**self).recommend(seed_track_ids, targets, limit)
    }

    fn playlist(&self, playlist_id: &str) -> Result<PlaylistContents, CatalogError> {
        (**self).playlist(playlist_id)
    }
}
