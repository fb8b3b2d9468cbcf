//! Feature averaging and mood classification over descriptor vectors.
//!
//! [`average`] takes per-track descriptors as they come back from the catalog,
//! `None` entries included, and computes an elementwise arithmetic mean.
//!
//! The set of features averaged is taken from the first valid descriptor only.
//! A feature that appears in later descriptors but not in the first one is
//! dropped from the aggregate. Callers that feed heterogeneous descriptors
//! should be aware of this.

use crate::track::DescriptorVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Feature name to mean value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateDescriptor(BTreeMap<String, f64>);

impl AggregateDescriptor {
    #[must_use]
    pub fn get(&self, feature: &str) -> Option<f64> {
        self.0.get(feature).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl FromIterator<(String, f64)> for AggregateDescriptor {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mean of every feature over the descriptors that carry it as a number.
///
/// `None` descriptors are dropped first; an empty or all-`None` input yields
/// an empty aggregate. A feature whose values are never numeric is omitted.
#[must_use]
pub fn average(vectors: &[Option<DescriptorVector>]) -> AggregateDescriptor {
    let valid: Vec<&DescriptorVector> = vectors.iter().flatten().collect();

    let Some(first) = valid.first() else {
        return AggregateDescriptor::default();
    };

    first
        .features()
        .filter_map(|feature| {
            let (sum, count) = valid
                .iter()
                .filter_map(|descriptor| descriptor.numeric(feature))
                .fold((0.0_f64, 0_u32), |(sum, count), value| (sum + value, count + 1));

            (count > 0).then(|| (feature.to_string(), sum / f64::from(count)))
        })
        .collect()
}

/// Mood label derived from an aggregate descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Happy,
    Sad,
    Energetic,
    Calm,
    Neutral,
}

impl MoodLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Energetic => "energetic",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stand-in for a feature the aggregate lacks. Only used for classifying.
const CLASSIFY_DEFAULT: f64 = 0.5;

/// Classify an aggregate by the first rule that holds, in this order:
/// happy, sad, energetic, calm, otherwise neutral.
#[must_use]
pub fn classify_mood(features: &AggregateDescriptor) -> MoodLabel {
    let valence = features.get("valence").unwrap_or(CLASSIFY_DEFAULT);
    let energy = features.get("energy").unwrap_or(CLASSIFY_DEFAULT);
    let danceability = features.get("danceability").unwrap_or(CLASSIFY_DEFAULT);

    match (valence, energy, danceability) {
        (v, e, _) if v > 0.7 && e > 0.7 => MoodLabel::Happy,
        (v, e, _) if v < 0.3 && e < 0.4 => MoodLabel::Sad,
        (_, e, d) if e > 0.8 && d > 0.7 => MoodLabel::Energetic,
        (v, e, _) if e < 0.4 && v < 0.6 => MoodLabel::Calm,
        _ => MoodLabel::Neutral,
    }
}
