//! Similarity ranking.
//!
//! The ranker standardizes every numeric feature column with statistics
//! fitted on the whole dataset, scales the seeds' mean vector with those
//! same statistics, and ranks every track by cosine similarity to it. Seed
//! songs are removed from their own results.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::features::{cosine_similarity, mean_vector, StandardScaler};
use crate::model::{FeatureVector, Recommendation, SeedSong, Track};

/// Ranks a dataset against seed songs.
///
/// Fitting the scaler and scaling the dataset happen once in
/// [`Recommender::new`], so one recommender can answer several requests
/// against the same dataset.
#[derive(Debug, Clone)]
pub struct Recommender<'a> {
    dataset: &'a Dataset,
    scaler: StandardScaler,
    scaled: Vec<FeatureVector>,
}

impl<'a> Recommender<'a> {
    /// Fit the scaler on `dataset` and pre-scale every track.
    ///
    /// # Errors
    /// Returns an error if a track's features are misaligned with the
    /// dataset's feature columns.
    pub fn new(dataset: &'a Dataset) -> Result<Self> {
        let dim = dataset.feature_columns().len();
        let scaler = StandardScaler::fit(dim, dataset.tracks().iter().map(|t| &t.features))?;
        let scaled = dataset
            .tracks()
            .iter()
            .map(|t| scaler.transform(&t.features))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dataset,
            scaler,
            scaled,
        })
    }

    /// Cosine similarity of an unscaled feature vector against every track,
    /// in dataset order. Nothing is filtered out.
    ///
    /// # Errors
    /// Returns an error if `vector` has the wrong dimension.
    pub fn score(&self, vector: &FeatureVector) -> Result<Vec<f64>> {
        let target = self.scaler.transform(vector)?;
        Ok(self
            .scaled
            .iter()
            .map(|row| cosine_similarity(&target, row))
            .collect())
    }

    /// Recommend up to `n` tracks similar to the seed songs.
    ///
    /// Results are sorted by similarity, highest first. The sort is stable:
    /// tracks with equal similarity keep their dataset order. No track
    /// matching any seed is ever returned.
    ///
    /// # Errors
    /// Returns [`crate::Error::NoValidSeeds`] if none of the seeds is in the
    /// dataset. No partial result is produced in that case.
    pub fn recommend(&self, seeds: &[SeedSong], n: usize) -> Result<Vec<Recommendation>> {
        let mean = mean_vector(self.dataset, seeds)?;
        let similarities = self.score(&mean)?;

        let mut scored: Vec<(&Track, f64)> = self
            .dataset
            .tracks()
            .iter()
            .zip(similarities)
            .filter(|(track, _)| !seeds.iter().any(|seed| seed.matches(track)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        log::debug!(
            "Ranked {} candidate tracks against {} seeds",
            scored.len(),
            seeds.len()
        );

        Ok(scored
            .into_iter()
            .take(n)
            .map(|(track, similarity)| Recommendation {
                name: track.name.clone(),
                artists: track.artists.clone(),
                similarity,
            })
            .collect())
    }
}

/// Recommend up to `n` tracks from `dataset` similar to `seeds`.
///
/// One-shot wrapper around [`Recommender`].
///
/// # Errors
/// See [`Recommender::recommend`].
pub fn recommend_songs(
    dataset: &Dataset,
    seeds: &[SeedSong],
    n: usize,
) -> Result<Vec<Recommendation>> {
    Recommender::new(dataset)?.recommend(seeds, n)
}
