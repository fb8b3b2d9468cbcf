//! # Curator Performance Benchmarks
//!
//! Benchmarks for the pure parts of curation: profile matching, descriptor
//! averaging, mood classification, and the mood pipeline running against an
//! in-memory catalog (so network latency does not drown out engine cost).
//!
//! ## Benchmark Categories
//!
//! - **Profile Matching**: Range checks against each mood profile
//! - **Aggregation**: Averaging descriptor sets of different sizes
//! - **Classification**: Mood labelling of aggregates
//! - **Pipelines**: Mood scan over a full candidate pool
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench profile_matching
//! cargo bench aggregation
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use curator::aggregate::{self, AggregateDescriptor};
use curator::catalog::{Catalog, CatalogError, TargetFeatures};
use curator::engine::CurationEngine;
use curator::profile::{self, MOOD_PROFILES};
use curator::track::{ArtistSummary, DescriptorVector, PlaylistContents, TrackSummary};
use serde_json::Value;
use std::hint::black_box;

/// Deterministic spread of descriptors across the feature space
fn create_descriptors(count: usize) -> Vec<Option<DescriptorVector>> {
    (0..count)
        .map(|i| {
            if i % 17 == 0 {
                return None;
            }
            let step = (i % 10) as f64 / 10.0;
            let mut descriptor = DescriptorVector::from_numeric([
                ("valence", step),
                ("energy", 1.0 - step),
                ("danceability", (step + 0.3) % 1.0),
                ("tempo", 80.0 + (i % 12) as f64 * 10.0),
                ("loudness", -12.0 + step * 4.0),
            ]);
            descriptor.insert("id", Value::from(format!("track{i:04}")));
            Some(descriptor)
        })
        .collect()
}

/// Catalog that answers every lookup from memory
struct StaticCatalog {
    candidates: Vec<TrackSummary>,
    descriptors: Vec<Option<DescriptorVector>>,
}

impl StaticCatalog {
    fn new(count: usize) -> Self {
        let candidates = (0..count)
            .map(|i| {
                TrackSummary::new(
                    i.to_string(),
                    format!("Song {i:04}"),
                    &[format!("Artist {}", i / 10)],
                    format!("Album {}", i / 5),
                    None,
                    format!("https://open.example/track/{i}"),
                    Some(50),
                )
            })
            .collect();
        Self {
            candidates,
            descriptors: create_descriptors(count),
        }
    }
}

impl Catalog for StaticCatalog {
    fn search_tracks(&self, _query: &str, limit: usize) -> Result<Vec<TrackSummary>, CatalogError> {
        Ok(self.candidates.iter().take(limit).cloned().collect())
    }

    fn search_artists(&self, _query: &str, _limit: usize) -> Result<Vec<ArtistSummary>, CatalogError> {
        Ok(Vec::new())
    }

    fn descriptor(&self, track_id: &str) -> Result<Option<DescriptorVector>, CatalogError> {
        let index: usize = track_id
            .parse()
            .map_err(|_| CatalogError::Malformed(track_id.to_string()))?;
        Ok(self.descriptors.get(index).cloned().flatten())
    }

    fn descriptors(&self, track_ids: &[String]) -> Result<Vec<Option<DescriptorVector>>, CatalogError> {
        track_ids.iter().map(|id| self.descriptor(id)).collect()
    }

    fn artist_top_tracks(&self, _artist_id: &str) -> Result<Vec<TrackSummary>, CatalogError> {
        Ok(Vec::new())
    }

    fn related_artists(&self, _artist_id: &str) -> Result<Vec<ArtistSummary>, CatalogError> {
        Ok(Vec::new())
    }

    fn recommend(
        &self,
        _seed_track_ids: &[String],
        _targets: &TargetFeatures,
        limit: usize,
    ) -> Result<Vec<TrackSummary>, CatalogError> {
        Ok(self.candidates.iter().take(limit).cloned().collect())
    }

    fn playlist(&self, _playlist_id: &str) -> Result<PlaylistContents, CatalogError> {
        Ok(PlaylistContents::default())
    }
}

fn benchmark_profile_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile_matching");
    let descriptors: Vec<DescriptorVector> = create_descriptors(500).into_iter().flatten().collect();

    for mood in MOOD_PROFILES.iter() {
        group.bench_with_input(BenchmarkId::new("match_500", mood.name), &mood.profile, |b, profile| {
            b.iter(|| {
                descriptors
                    .iter()
                    .filter(|d| profile::matches(black_box(d), black_box(profile)))
                    .count()
            })
        });
    }

    group.bench_function("lookup_mood_mixed_case", |b| {
        b.iter(|| profile::lookup_mood(black_box("WorkOut")))
    });

    group.finish();
}

fn benchmark_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for size in [5, 50, 100, 500].iter() {
        let descriptors = create_descriptors(*size);
        group.bench_with_input(BenchmarkId::new("average", size), &descriptors, |b, descriptors| {
            b.iter(|| aggregate::average(black_box(descriptors)))
        });
    }

    group.finish();
}

fn benchmark_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    let aggregates: Vec<AggregateDescriptor> = (0..100u8)
        .map(|i| {
            let step = f64::from(i) / 100.0;
            [("valence", step), ("energy", 1.0 - step), ("danceability", step)]
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect()
        })
        .collect();

    group.bench_function("classify_100", |b| {
        b.iter(|| {
            aggregates
                .iter()
                .map(|a| aggregate::classify_mood(black_box(a)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn benchmark_pipelines(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipelines");

    for mood in ["happy", "calm", "workout"] {
        group.bench_function(BenchmarkId::new("mood_scan", mood), |b| {
            b.iter_batched(
                || CurationEngine::new(StaticCatalog::new(50)),
                |engine| engine.generate_mood_playlist(black_box(mood), black_box(20)),
                BatchSize::SmallInput,
            )
        });
    }

    let engine = CurationEngine::new(StaticCatalog::new(50));
    let seeds: Vec<String> = (1..=8).map(|i| i.to_string()).collect();
    group.bench_function("smart_targets", |b| {
        b.iter(|| engine.generate_smart_playlist(black_box(&seeds), black_box(20)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_profile_matching,
    benchmark_aggregation,
    benchmark_classification,
    benchmark_pipelines
);
criterion_main!(benches);
