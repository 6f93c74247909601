use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered numeric audio features, aligned with a dataset's numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    #[must_use]
    pub const fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// A vector of `len` zeros.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Dot product with another vector of the same dimension.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum()
    }

    /// Euclidean (L2) norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// A single row of the track dataset.
///
/// Tracks have no stable key. They are identified by their (name, artist)
/// pairing; see [`crate::SeedSong::matches`] for the matching rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track title.
    pub name: String,

    /// Comma-joined artist names, as stored in the dataset.
    pub artists: String,

    /// Catalog identifier, when the dataset has an `id` column.
    pub id: Option<String>,

    /// Numeric audio features, aligned with [`crate::Dataset::feature_columns`].
    pub features: FeatureVector,
}

impl Track {
    #[must_use]
    pub fn new(name: impl Into<String>, artists: impl Into<String>, features: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            artists: artists.into(),
            id: None,
            features: FeatureVector::new(features),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.artists)
    }
}
