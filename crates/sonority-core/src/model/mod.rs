pub mod recommendation;
pub mod seed;
pub mod track;

pub use recommendation::Recommendation;
pub use seed::SeedSong;
pub use track::{FeatureVector, Track};
