use crate::model::FeatureVector;

/// Cosine of the angle between two vectors.
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::MIN_POSITIVE {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0)
}
