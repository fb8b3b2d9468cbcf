//! # Mood Range Profiles
//!
//! A [`RangeProfile`] is a set of closed intervals over descriptor features.
//! The six mood profiles live in a process-wide read-only table that is built
//! once on first use and looked up case-insensitively.
//!
//! Matching is permissive: a feature the descriptor does not carry (or carries
//! as `null`/non-numeric) is skipped rather than counted against the track, so
//! partial descriptor data degrades matching gracefully.
//!
//! ```
//! use curator::profile::{lookup_mood, matches};
//! use curator::track::DescriptorVector;
//!
//! let happy = lookup_mood("Happy")?;
//! let descriptor = DescriptorVector::from_numeric([
//!     ("valence", 0.8), ("energy", 0.7), ("danceability", 0.6), ("tempo", 128.0),
//! ]);
//! assert!(matches(&descriptor, happy));
//! # Ok::<(), curator::error::CurationError>(())
//! ```

use crate::error::CurationError;
use crate::track::DescriptorVector;
use serde::Serialize;

/// Closed interval `[min, max]`, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Feature name to acceptable interval, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeProfile {
    ranges: Vec<(&'static str, FeatureRange)>,
}

impl RangeProfile {
    #[must_use]
    pub fn new(ranges: Vec<(&'static str, FeatureRange)>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> impl Iterator<Item = (&'static str, FeatureRange)> + '_ {
        self.ranges.iter().copied()
    }

    #[must_use]
    pub fn range(&self, feature: &str) -> Option<FeatureRange> {
        self.ranges
            .iter()
            .find(|(name, _)| *name == feature)
            .map(|(_, range)| *range)
    }
}

/// A named entry of the mood table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodProfile {
    pub name: &'static str,
    pub profile: RangeProfile,
}

fn mood(
    name: &'static str,
    valence: (f64, f64),
    energy: (f64, f64),
    danceability: (f64, f64),
    tempo: (f64, f64),
) -> MoodProfile {
    MoodProfile {
        name,
        profile: RangeProfile::new(vec![
            ("valence", FeatureRange::new(valence.0, valence.1)),
            ("energy", FeatureRange::new(energy.0, energy.1)),
            ("danceability", FeatureRange::new(danceability.0, danceability.1)),
            ("tempo", FeatureRange::new(tempo.0, tempo.1)),
        ]),
    }
}

lazy_static::lazy_static! {
    /// The fixed mood table, in presentation order.
    pub static ref MOOD_PROFILES: Vec<MoodProfile> = vec![
        mood("happy", (0.6, 1.0), (0.5, 1.0), (0.5, 1.0), (100.0, 180.0)),
        mood("sad", (0.0, 0.4), (0.0, 0.5), (0.0, 0.4), (60.0, 120.0)),
        mood("energetic", (0.4, 1.0), (0.7, 1.0), (0.6, 1.0), (120.0, 200.0)),
        mood("calm", (0.3, 0.7), (0.0, 0.4), (0.0, 0.5), (60.0, 100.0)),
        mood("party", (0.6, 1.0), (0.8, 1.0), (0.7, 1.0), (120.0, 180.0)),
        mood("workout", (0.5, 1.0), (0.8, 1.0), (0.6, 1.0), (140.0, 200.0)),
    ];
}

/// Names of every known mood, in table order.
#[must_use]
pub fn mood_names() -> Vec<&'static str> {
    MOOD_PROFILES.iter().map(|entry| entry.name).collect()
}

/// Resolve a mood name (any case) to its profile.
///
/// # Errors
///
/// Returns [`CurationError::UnknownMood`] listing the valid names. There is no
/// fallback profile.
pub fn lookup_mood(mood: &str) -> Result<&'static RangeProfile, CurationError> {
    let wanted = mood.trim().to_lowercase();
    MOOD_PROFILES
        .iter()
        .find(|entry| entry.name == wanted)
        .map(|entry| &entry.profile)
        .ok_or_else(|| CurationError::UnknownMood {
            mood: mood.to_string(),
            available: mood_names(),
        })
}

/// True when every profile feature the descriptor carries as a number lies
/// inside its interval. Features missing from the descriptor are skipped.
#[must_use]
pub fn matches(descriptor: &DescriptorVector, profile: &RangeProfile) -> bool {
    profile.ranges().all(|(feature, range)| {
        descriptor
            .numeric(feature)
            .map_or(true, |value| range.contains(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn happy_track() -> DescriptorVector {
        DescriptorVector::from_numeric([
            ("valence", 0.8),
            ("energy", 0.7),
            ("danceability", 0.6),
            ("tempo", 128.0),
        ])
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(lookup_mood("Happy").is_ok());
        assert!(lookup_mood("WORKOUT").is_ok());
        assert_eq!(lookup_mood("calm").unwrap(), &MOOD_PROFILES[3].profile);
    }

    #[test]
    fn test_unknown_mood_lists_available_names() {
        let err = lookup_mood("bogus").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bogus"));
        assert!(message.contains("happy, sad, energetic, calm, party, workout"));
    }

    #[test]
    fn test_table_bounds() {
        let party = lookup_mood("party").unwrap();
        assert_eq!(party.range("energy"), Some(FeatureRange::new(0.8, 1.0)));
        assert_eq!(party.range("tempo"), Some(FeatureRange::new(120.0, 180.0)));

        let sad = lookup_mood("sad").unwrap();
        assert_eq!(sad.range("valence"), Some(FeatureRange::new(0.0, 0.4)));
        assert_eq!(sad.range("loudness"), None);
        assert_eq!(mood_names().len(), 6);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let calm = lookup_mood("calm").unwrap();
        let lower = DescriptorVector::from_numeric([
            ("valence", 0.3),
            ("energy", 0.0),
            ("danceability", 0.0),
            ("tempo", 60.0),
        ]);
        let upper = DescriptorVector::from_numeric([
            ("valence", 0.7),
            ("energy", 0.4),
            ("danceability", 0.5),
            ("tempo", 100.0),
        ]);
        assert!(matches(&lower, calm));
        assert!(matches(&upper, calm));
    }

    #[test]
    fn test_single_out_of_range_feature_disqualifies() {
        let happy = lookup_mood("happy").unwrap();
        let mut descriptor = happy_track();
        descriptor.insert("tempo", Value::from(90.0));
        assert!(!matches(&descriptor, happy));
    }

    #[test]
    fn test_missing_features_are_skipped() {
        let happy = lookup_mood("happy").unwrap();
        let partial = DescriptorVector::from_numeric([("valence", 0.9)]);
        assert!(matches(&partial, happy));
        assert!(matches(&DescriptorVector::default(), happy));

        let mut null_tempo = happy_track();
        null_tempo.insert("tempo", Value::Null);
        assert!(matches(&null_tempo, happy));
    }

    #[test]
    fn test_unconstrained_features_do_not_change_outcome() {
        for entry in MOOD_PROFILES.iter() {
            let base = happy_track();
            let mut extended = base.clone();
            extended.insert("loudness", Value::from(-60.0));
            extended.insert("uri", Value::from("spotify:track:x"));
            assert_eq!(
                matches(&base, &entry.profile),
                matches(&extended, &entry.profile),
                "extra feature changed outcome for {}",
                entry.name
            );
        }
    }
}
