//! Rendering of curation results for the terminal.
//!
//! Table output goes to stdout; a note about an interrupted pipeline goes to
//! stderr so piped output stays clean. `--json` prints the serde form instead.

use crate::engine::{Curation, PlaylistAnalysis};
use crate::profile::MoodProfile;
use crate::track::{DescriptorVector, TrackSummary};
use anyhow::Result;
use serde::Serialize;

/// Pretty-print any serializable value as JSON.
///
/// # Errors
///
/// Returns the serialization error, which only happens for non-string map keys.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One numbered line per track.
#[must_use]
pub fn format_track_line(position: usize, track: &TrackSummary) -> String {
    let popularity = track
        .popularity
        .map_or_else(String::new, |p| format!(" (popularity: {p})"));
    format!(
        "{:>3}. {} - {} [{}]{}",
        position, track.artist, track.name, track.album, popularity
    )
}

pub fn print_curation(title: &str, curation: &Curation) {
    println!("{title}: {} tracks", curation.len());
    for (i, track) in curation.tracks.iter().enumerate() {
        println!("{}", format_track_line(i + 1, track));
        if let Some(descriptor) = &track.descriptor {
            println!("       {}", format_descriptor_brief(descriptor));
        }
    }

    if let Some(error) = &curation.upstream_error {
        eprintln!("warning: catalog request failed, result may be incomplete: {error}");
    }
}

/// `valence 0.81 · energy 0.77 · ...` for the four matching features.
#[must_use]
pub fn format_descriptor_brief(descriptor: &DescriptorVector) -> String {
    ["valence", "energy", "danceability", "tempo"]
        .iter()
        .filter_map(|feature| {
            descriptor
                .numeric(feature)
                .map(|value| format!("{feature} {value:.2}"))
        })
        .collect::<Vec<_>>()
        .join(" · ")
}

pub fn print_analysis(analysis: &PlaylistAnalysis) {
    println!("Playlist: {}", analysis.playlist_name);
    println!("Tracks analyzed: {}", analysis.track_count);
    println!("Mood: {}", analysis.mood);
    println!("Average features:");
    for (feature, value) in analysis.average_features.iter() {
        println!("  {feature:<18} {value:>10.3}");
    }
}

pub fn print_features(track_ids: &[String], descriptors: &[Option<DescriptorVector>]) {
    for (id, descriptor) in track_ids.iter().zip(descriptors) {
        match descriptor {
            Some(descriptor) => println!("{id}: {}", format_descriptor_brief(descriptor)),
            None => println!("{id}: no audio features available"),
        }
    }
}

pub fn print_moods(moods: &[MoodProfile]) {
    for mood in moods {
        let ranges = mood
            .profile
            .ranges()
            .map(|(feature, range)| format!("{feature} {}-{}", range.min, range.max))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<10} {ranges}", mood.name);
    }
}
