//! # Spotify Web API Catalog
//!
//! Blocking [`Catalog`] implementation over the Spotify Web API. Each trait
//! call maps to one HTTP request (batch descriptor lookups are split into
//! chunks the API accepts). The client carries a bearer token supplied by the
//! user; obtaining that token is not this crate's concern.
//!
//! Wire payloads are decoded into private structs and converted into the
//! crate's own [`TrackSummary`]/[`DescriptorVector`] values here, so nothing
//! Spotify-shaped leaks into the engine.

use crate::catalog::{Catalog, CatalogError, TargetFeatures};
use crate::config::RuntimeConfig;
use crate::track::{ArtistSummary, DescriptorVector, PlaylistContents, PlaylistItem, TrackSummary};
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Most ids the audio-features endpoint accepts per request.
const DESCRIPTOR_BATCH_SIZE: usize = 100;

/// Most results the search endpoint returns per request.
const SEARCH_LIMIT_MAX: usize = 50;

/// Bodies of failed responses are cut to this many characters in errors.
const ERROR_BODY_EXCERPT: usize = 200;

pub struct SpotifyCatalog {
    client: Client,
    base_url: Url,
    access_token: String,
    market: String,
}

impl SpotifyCatalog {
    /// Build a client from the runtime configuration.
    ///
    /// # Errors
    ///
    /// [`CatalogError::MissingCredentials`] without an access token,
    /// [`CatalogError::InvalidBaseUrl`] for an unusable API root, or a
    /// transport error if the HTTP client cannot be built.
    pub fn new(config: &RuntimeConfig) -> Result<Self, CatalogError> {
        let access_token = config
            .access_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or(CatalogError::MissingCredentials)?;

        let base_url = parse_base_url(&config.api_base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            access_token,
            market: config.market.clone(),
        })
    }

    /// GET `segments` below the API root. Each segment is percent-encoded, so
    /// ids can never step outside their endpoint.
    fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, String)]) -> Result<T, CatalogError> {
        let url = endpoint_url(&self.base_url, segments)?;
        debug!("GET {url} {query:?}");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_EXCERPT).collect(),
            });
        }

        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| CatalogError::Malformed(format!("{}: {e}", url.path())))
    }

    fn search<T: DeserializeOwned>(&self, query: &str, kind: &str, limit: usize) -> Result<T, CatalogError> {
        let page_size = search_page_size(limit);
        self.get(
            &["search"],
            &[
                ("q", query.to_string()),
                ("type", kind.to_string()),
                ("limit", page_size.to_string()),
            ],
        )
    }
}

impl Catalog for SpotifyCatalog {
    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<TrackSummary>, CatalogError> {
        let response: TrackSearchResponse = self.search(query, "track", limit)?;
        Ok(summarize(response.tracks.items))
    }

    fn search_artists(&self, query: &str, limit: usize) -> Result<Vec<ArtistSummary>, CatalogError> {
        let response: ArtistSearchResponse = self.search(query, "artist", limit)?;
        Ok(response.artists.items.into_iter().map(ArtistSummary::from).collect())
    }

    fn descriptor(&self, track_id: &str) -> Result<Option<DescriptorVector>, CatalogError> {
        absent_on_not_found(self.get(&["audio-features", track_id], &[]))
    }

    fn descriptors(&self, track_ids: &[String]) -> Result<Vec<Option<DescriptorVector>>, CatalogError> {
        fetch_in_batches(track_ids, |chunk| {
            let response: DescriptorBatchResponse = self.get(&["audio-features"], &[("ids", chunk.join(","))])?;
            Ok(response.audio_features)
        })
    }

    fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<TrackSummary>, CatalogError> {
        let response: TopTracksResponse = self.get(
            &["artists", artist_id, "top-tracks"],
            &[("market", self.market.clone())],
        )?;
        Ok(summarize(response.tracks))
    }

    fn related_artists(&self, artist_id: &str) -> Result<Vec<ArtistSummary>, CatalogError> {
        let response: RelatedArtistsResponse = self.get(&["artists", artist_id, "related-artists"], &[])?;
        Ok(response.artists.into_iter().map(ArtistSummary::from).collect())
    }

    fn recommend(
        &self,
        seed_track_ids: &[String],
        targets: &TargetFeatures,
        limit: usize,
    ) -> Result<Vec<TrackSummary>, CatalogError> {
        let mut query = vec![
            ("seed_tracks", seed_track_ids.join(",")),
            ("limit", limit.to_string()),
        ];
        query.extend(
            targets
                .query_params()
                .into_iter()
                .map(|(param, value)| (param, value.to_string())),
        );

        let response: TopTracksResponse = self.get(&["recommendations"], &query)?;
        Ok(summarize(response.tracks))
    }

    fn playlist(&self, playlist_id: &str) -> Result<PlaylistContents, CatalogError> {
        let response: PlaylistResponse = self.get(&["playlists", playlist_id], &[])?;
        Ok(response.into())
    }
}

/// The search endpoint serves at most [`SEARCH_LIMIT_MAX`] results; larger
/// requests are cut down with a warning.
fn search_page_size(limit: usize) -> usize {
    let page_size = limit.clamp(1, SEARCH_LIMIT_MAX);
    if page_size != limit {
        warn!("Search limit {limit} is outside 1..={SEARCH_LIMIT_MAX}, requesting {page_size}");
    }
    page_size
}

fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
    let url = Url::parse(raw).map_err(|e| CatalogError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CatalogError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// A single-descriptor lookup answered with 404 means the catalog has no
/// descriptor for that track.
fn absent_on_not_found(
    result: Result<Option<DescriptorVector>, CatalogError>,
) -> Result<Option<DescriptorVector>, CatalogError> {
    match result {
        Err(CatalogError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Ok(None),
        other => other,
    }
}

/// Look descriptors up in chunks the endpoint accepts, keeping the output
/// aligned with `track_ids`. A chunk answered with the wrong number of
/// entries fails the whole lookup.
fn fetch_in_batches<F>(track_ids: &[String], mut fetch: F) -> Result<Vec<Option<DescriptorVector>>, CatalogError>
where
    F: FnMut(&[String]) -> Result<Vec<Option<DescriptorVector>>, CatalogError>,
{
    let mut descriptors = Vec::with_capacity(track_ids.len());

    for chunk in track_ids.chunks(DESCRIPTOR_BATCH_SIZE) {
        let batch = fetch(chunk)?;
        if batch.len() != chunk.len() {
            return Err(CatalogError::Malformed(format!(
                "expected {} audio features, got {}",
                chunk.len(),
                batch.len()
            )));
        }
        descriptors.extend(batch);
    }

    Ok(descriptors)
}

fn summarize(tracks: Vec<WireTrack>) -> Vec<TrackSummary> {
    tracks.into_iter().filter_map(WireTrack::into_summary).collect()
}

// Wire format

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TrackSearchResponse {
    tracks: Page<WireTrack>,
}

#[derive(Debug, Deserialize)]
struct ArtistSearchResponse {
    artists: Page<WireArtist>,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    tracks: Vec<WireTrack>,
}

#[derive(Debug, Deserialize)]
struct RelatedArtistsResponse {
    #[serde(default)]
    artists: Vec<WireArtist>,
}

#[derive(Debug, Deserialize)]
struct DescriptorBatchResponse {
    #[serde(default)]
    audio_features: Vec<Option<DescriptorVector>>,
}

#[derive(Debug, Deserialize)]
struct PlaylistResponse {
    name: String,
    tracks: Page<WirePlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct WirePlaylistItem {
    track: Option<WireTrackRef>,
}

#[derive(Debug, Deserialize)]
struct WireTrackRef {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireTrack {
    id: Option<String>,
    name: String,
    #[serde(default)]
    artists: Vec<WireArtistRef>,
    album: WireAlbum,
    preview_url: Option<String>,
    #[serde(default)]
    external_urls: WireExternalUrls,
    popularity: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireArtistRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireAlbum {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireArtist {
    id: String,
    name: String,
}

impl WireTrack {
    fn into_summary(self) -> Option<TrackSummary> {
        let Some(id) = self.id else {
            warn!("Skipping track '{}' without an id", self.name);
            return None;
        };
        let artists: Vec<String> = self.artists.into_iter().map(|a| a.name).collect();

        Some(TrackSummary::new(
            id,
            self.name,
            &artists,
            self.album.name,
            self.preview_url,
            self.external_urls.spotify.unwrap_or_default(),
            self.popularity,
        ))
    }
}

impl From<WireArtist> for ArtistSummary {
    fn from(artist: WireArtist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

impl From<PlaylistResponse> for PlaylistContents {
    fn from(playlist: PlaylistResponse) -> Self {
        Self {
            name: playlist.name,
            items: playlist
                .tracks
                .items
                .into_iter()
                .map(|item| PlaylistItem {
                    track_id: item.track.and_then(|track| track.id),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_track(id: Option<&str>, popularity: u32) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Midnight City",
            "artists": [{"name": "M83"}, {"name": "Guest"}],
            "album": {"name": "Hurry Up, We're Dreaming"},
            "preview_url": null,
            "external_urls": {"spotify": "https://open.spotify.com/track/abc"},
            "popularity": popularity
        })
    }

    #[test]
    fn test_track_search_payload_is_summarized() {
        let payload = json!({"tracks": {"items": [wire_track(Some("abc"), 71), wire_track(None, 10)]}});
        let response: TrackSearchResponse = serde_json::from_value(payload).unwrap();
        let tracks = summarize(response.tracks.items);

        assert_eq!(tracks.len(), 1);
        let track = &tracks[0];
        assert_eq!(track.id, "abc");
        assert_eq!(track.artist, "M83, Guest");
        assert_eq!(track.album, "Hurry Up, We're Dreaming");
        assert_eq!(track.external_url, "https://open.spotify.com/track/abc");
        assert_eq!(track.popularity, Some(71));
        assert_eq!(track.preview_url, None);
    }

    #[test]
    fn test_recommendation_track_without_popularity() {
        let mut raw = wire_track(Some("r1"), 0);
        raw.as_object_mut().unwrap().remove("popularity");
        let response: TopTracksResponse = serde_json::from_value(json!({"tracks": [raw]})).unwrap();

        let tracks = summarize(response.tracks);
        assert_eq!(tracks[0].popularity, None);
    }

    #[test]
    fn test_descriptor_batch_keeps_nulls_aligned() {
        let payload = json!({"audio_features": [
            {"id": "a", "energy": 0.7, "tempo": 121.0, "type": "audio_features"},
            null
        ]});
        let response: DescriptorBatchResponse = serde_json::from_value(payload).unwrap();

        assert_eq!(response.audio_features.len(), 2);
        let first = response.audio_features[0].as_ref().unwrap();
        assert_eq!(first.numeric("energy"), Some(0.7));
        assert_eq!(first.numeric("type"), None);
        assert!(response.audio_features[1].is_none());
    }

    #[test]
    fn test_playlist_items_without_ids() {
        let payload = json!({
            "name": "Road Trip",
            "tracks": {"items": [
                {"track": {"id": "t1"}},
                {"track": {"id": null}},
                {"track": null}
            ]}
        });
        let response: PlaylistResponse = serde_json::from_value(payload).unwrap();
        let contents = PlaylistContents::from(response);

        assert_eq!(contents.name, "Road Trip");
        assert_eq!(contents.items.len(), 3);
        assert_eq!(contents.items[0].track_id.as_deref(), Some("t1"));
        assert_eq!(contents.items[1].track_id, None);
        assert_eq!(contents.items[2].track_id, None);
    }

    #[test]
    fn test_search_page_size_bounds() {
        assert_eq!(search_page_size(20), 20);
        assert_eq!(search_page_size(100), SEARCH_LIMIT_MAX);
        assert_eq!(search_page_size(0), 1);
    }

    #[test]
    fn test_page_without_items_is_empty() {
        let response: TrackSearchResponse = serde_json::from_value(json!({"tracks": {"total": 0}})).unwrap();
        assert!(response.tracks.items.is_empty());
    }

    fn ids(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("t{i}")).collect()
    }

    fn descriptor_for(id: &str) -> Option<DescriptorVector> {
        let mut descriptor = DescriptorVector::from_numeric([("energy", 0.5)]);
        descriptor.insert("id", serde_json::Value::from(id));
        Some(descriptor)
    }

    #[test]
    fn test_batches_split_at_100_and_stay_aligned() {
        let track_ids = ids(205);
        let mut chunk_sizes = Vec::new();

        let descriptors = fetch_in_batches(&track_ids, |chunk| {
            chunk_sizes.push(chunk.len());
            Ok(chunk
                .iter()
                .map(|id| if id == "t150" { None } else { descriptor_for(id) })
                .collect())
        })
        .unwrap();

        assert_eq!(chunk_sizes, vec![100, 100, 5]);
        assert_eq!(descriptors.len(), 205);
        assert_eq!(descriptors[101], descriptor_for("t101"));
        assert_eq!(descriptors[204], descriptor_for("t204"));
        assert!(descriptors[150].is_none());
    }

    #[test]
    fn test_short_batch_is_malformed() {
        let track_ids = ids(101);
        let result = fetch_in_batches(&track_ids, |chunk| Ok(chunk.iter().skip(1).map(|id| descriptor_for(id)).collect()));
        assert!(matches!(result, Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn test_batch_failure_stops_lookup() {
        let mut calls = 0;
        let result = fetch_in_batches(&ids(250), |_| {
            calls += 1;
            Err(CatalogError::Status {
                status: 500,
                message: "boom".into(),
            })
        });
        assert!(matches!(result, Err(CatalogError::Status { status: 500, .. })));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_not_found_descriptor_is_absent() {
        let not_found = Err(CatalogError::Status {
            status: 404,
            message: "Not found".into(),
        });
        assert!(matches!(absent_on_not_found(not_found), Ok(None)));

        let unavailable = Err(CatalogError::Status {
            status: 503,
            message: "down".into(),
        });
        assert!(matches!(
            absent_on_not_found(unavailable),
            Err(CatalogError::Status { status: 503, .. })
        ));
    }

    #[test]
    fn test_ids_are_escaped_into_one_segment() {
        let base = parse_base_url("https://api.spotify.com/v1").unwrap();

        let url = endpoint_url(&base, &["playlists", "../me"]).unwrap();
        assert_eq!(url.path(), "/v1/playlists/..%2Fme");

        let url = endpoint_url(&base, &["audio-features", "a?b#c"]).unwrap();
        assert_eq!(url.path(), "/v1/audio-features/a%3Fb%23c");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_trailing_slash_on_base_url() {
        let base = parse_base_url("http://localhost:8080/v1/").unwrap();
        let url = endpoint_url(&base, &["artists", "a1", "top-tracks"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/artists/a1/top-tracks");
    }

    #[test]
    fn test_unusable_base_url() {
        assert!(matches!(parse_base_url("not a url"), Err(CatalogError::InvalidBaseUrl(_))));
        assert!(matches!(parse_base_url("mailto:someone@example.com"), Err(CatalogError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_client_requires_token() {
        let config = RuntimeConfig {
            access_token: None,
            ..RuntimeConfig::default()
        };
        assert!(matches!(SpotifyCatalog::new(&config), Err(CatalogError::MissingCredentials)));
    }
}
