//! Core domain model for sonority.
//!
//! This crate defines the track dataset, seed song lookup, feature
//! scaling, cosine similarity, and the similarity ranker that turns a
//! handful of seed songs into a ranked list of recommendations.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod dataset;
pub mod error;
pub mod features;
pub mod model;
pub mod recommend;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use features::mean_vector;
pub use model::{FeatureVector, Recommendation, SeedSong, Track};
pub use recommend::{recommend_songs, Recommender};
