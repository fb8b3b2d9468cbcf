//! Error types for the curation engine.
//!
//! Validation problems are returned to the caller as [`CurationError`].
//! Upstream catalog failures inside generation pipelines never surface as
//! errors; see [`crate::engine::Curation`]. Playlist analysis reports its
//! outcomes through [`AnalysisError`], which renders as an `{"error": ..}`
//! payload.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Invalid request parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurationError {
    #[error("Unknown mood: {mood}. Available moods: {}", .available.join(", "))]
    UnknownMood {
        mood: String,
        available: Vec<&'static str>,
    },

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),
}

/// Named analysis failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Playlist ID required")]
    MissingPlaylistId,

    #[error("Playlist is empty")]
    EmptyPlaylist,

    #[error("No valid tracks found")]
    NoValidTracks,

    #[error("No audio features available")]
    NoAudioFeatures,

    /// The catalog failed while the analysis was running
    #[error("{0}")]
    Upstream(String),
}

impl Serialize for AnalysisError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.to_string())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_error_payloads() {
        assert_eq!(
            serde_json::to_value(AnalysisError::EmptyPlaylist).unwrap(),
            json!({"error": "Playlist is empty"})
        );
        assert_eq!(
            serde_json::to_value(AnalysisError::Upstream("HTTP 503".into())).unwrap(),
            json!({"error": "HTTP 503"})
        );
    }

    #[test]
    fn test_missing_input_message() {
        assert_eq!(
            CurationError::MissingInput("query").to_string(),
            "Missing required input: query"
        );
    }
}
