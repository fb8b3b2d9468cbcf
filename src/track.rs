//! # Track Data Model
//!
//! Plain values exchanged between the catalog and the curation engine.
//! Everything here is produced fresh per query and never mutated afterwards.
//!
//! - [`TrackSummary`] - the uniform shape every curation mode returns
//! - [`ArtistSummary`] - the minimal artist record used by the artist pipeline
//! - [`DescriptorVector`] - per-track numeric audio characteristics
//! - [`PlaylistContents`] - an existing playlist's name and items

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Track metadata as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    /// Contributing artist names joined with `", "`
    pub artist: String,
    pub album: String,
    pub preview_url: Option<String>,
    pub external_url: String,
    /// Always within `0..=100` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u8>,
    /// Only filled in by pipelines that had to look the descriptors up
    #[serde(rename = "audio_features", skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<DescriptorVector>,
}

impl TrackSummary {
    /// Build a summary from its parts, joining artist names and discarding
    /// a popularity score outside the `0..=100` range.
    #[must_use]
    pub fn new<S: AsRef<str>>(
        id: impl Into<String>,
        name: impl Into<String>,
        artists: &[S],
        album: impl Into<String>,
        preview_url: Option<String>,
        external_url: impl Into<String>,
        popularity: Option<u32>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: join_artist_names(artists),
            album: album.into(),
            preview_url,
            external_url: external_url.into(),
            popularity: popularity
                .filter(|p| *p <= 100)
                .and_then(|p| u8::try_from(p).ok()),
            descriptor: None,
        }
    }

    /// Returns a copy decorated with the descriptor it was matched on.
    #[must_use]
    pub fn with_descriptor(self, descriptor: DescriptorVector) -> Self {
        Self {
            descriptor: Some(descriptor),
            ..self
        }
    }
}

/// Join artist names the way they are displayed: `"A, B, C"`.
#[must_use]
pub fn join_artist_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
}

/// Named numeric audio characteristics of one track.
///
/// Values are kept exactly as the catalog delivered them; fields that are not
/// numbers (identifiers, URIs, `null`) pass through untouched. Anything that
/// matches or averages over a descriptor reads it through [`DescriptorVector::numeric`],
/// so a non-numeric entry is never coerced into a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorVector(BTreeMap<String, Value>);

impl DescriptorVector {
    #[must_use]
    pub fn new(fields: BTreeMap<String, Value>) -> Self {
        Self(fields)
    }

    /// Convenience constructor for purely numeric descriptors.
    #[must_use]
    pub fn from_numeric<'a>(fields: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), Value::from(value)))
                .collect(),
        )
    }

    /// The value of `feature` if it is present, non-null and a finite number.
    #[must_use]
    pub fn numeric(&self, feature: &str) -> Option<f64> {
        self.0
            .get(feature)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn contains(&self, feature: &str) -> bool {
        self.0.contains_key(feature)
    }

    /// Feature names in a stable (sorted) order.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn insert(&mut self, feature: impl Into<String>, value: Value) {
        self.0.insert(feature.into(), value);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One entry of an existing playlist. Local files and removed tracks come
/// back without an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistContents {
    pub name: String,
    pub items: Vec<PlaylistItem>,
}
