use serde::{Deserialize, Serialize};

/// One ranked result: a dataset track and its similarity to the seed songs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub artists: String,

    /// Cosine similarity in [-1.0, 1.0].
    pub similarity: f64,
}
