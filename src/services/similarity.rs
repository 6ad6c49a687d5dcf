use crate::models::UNRATED;

/// Similarity between two equal-length rating vectors
///
/// Implementations must be pure, symmetric and return a value in `[0, 1]`.
/// Callers guarantee the slices have the same length.
pub trait SimilarityMetric: Send + Sync {
    fn similarity(&self, user: &[i32], peer: &[i32]) -> f64;
}

/// Jaccard coefficient over rated positions
///
/// Compares which books two readers rated, not how they rated them:
/// `|rated(a) ∩ rated(b)| / |rated(a) ∪ rated(b)|`. When either side has rated
/// nothing there is no overlap information and every peer weighs 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jaccard;

impl SimilarityMetric for Jaccard {
    fn similarity(&self, user: &[i32], peer: &[i32]) -> f64 {
        let mut intersection = 0usize;
        let mut union = 0usize;
        let mut user_rated = 0usize;
        let mut peer_rated = 0usize;

        for (&a, &b) in user.iter().zip(peer) {
            let (a, b) = (a != UNRATED, b != UNRATED);
            user_rated += a as usize;
            peer_rated += b as usize;
            intersection += (a && b) as usize;
            union += (a || b) as usize;
        }

        if user_rated == 0 || peer_rated == 0 {
            return 1.0;
        }

        intersection as f64 / union as f64
    }
}
