use crate::models::{RatingDataset, RatingVector, Score, UNRATED};

use super::similarity::{Jaccard, SimilarityMetric};

/// Folds every peer's ratings into a similarity-weighted average per book
#[derive(Debug, Clone)]
pub struct PreferenceAggregator<M = Jaccard> {
    metric: M,
}

impl<M: SimilarityMetric> PreferenceAggregator<M> {
    pub fn new(metric: M) -> Self {
        Self { metric }
    }

    /// Predicts a score for every catalog slot
    ///
    /// `score[i] = Σ rating[i]·s / Σ s`, the denominator summing only over
    /// peers who rated book `i`. A zero denominator yields `Score::NoSignal`.
    /// Widths must already agree; that is checked at the request boundary.
    pub fn aggregate(&self, user: &RatingVector, dataset: &RatingDataset) -> Vec<Score> {
        let width = dataset.width();
        let mut weighted_sum = vec![0.0f64; width];
        let mut weight_sum = vec![0.0f64; width];

        for peer in dataset.rows() {
            let s = self.metric.similarity(user.as_slice(), peer.as_slice());

            for (i, &rating) in peer.as_slice().iter().enumerate() {
                weighted_sum[i] += rating as f64 * s;
                if rating != UNRATED {
                    weight_sum[i] += s;
                }
            }
        }

        let scores: Vec<Score> = weighted_sum
            .into_iter()
            .zip(weight_sum)
            .map(|(total, weight)| {
                if weight == 0.0 {
                    Score::NoSignal
                } else {
                    Score::Scored(total / weight)
                }
            })
            .collect();

        tracing::debug!(
            peers = dataset.peer_count(),
            books = width,
            scored = scores.iter().filter(|s| s.is_scored()).count(),
            "Aggregated peer ratings"
        );

        scores
    }
}
