//! Feature-space math: seed aggregation, standardization, and similarity.

pub mod aggregate;
pub mod scaler;
pub mod similarity;

pub use aggregate::mean_vector;
pub use scaler::StandardScaler;
pub use similarity::cosine_similarity;
