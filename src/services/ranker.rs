use serde::{Deserialize, Serialize};

use crate::models::{Catalog, RatingVector, RecommendationEntry, Score};

/// Placement of books no similar peer has rated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoSignalPolicy {
    /// Leave them out of the result
    #[default]
    Exclude,
    /// Append them after every scored book, in catalog order
    RankLast,
}

/// Masks already-rated books and orders the rest by predicted score
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationRanker {
    policy: NoSignalPolicy,
}

impl RecommendationRanker {
    pub fn new(policy: NoSignalPolicy) -> Self {
        Self { policy }
    }

    /// Ranks every book the user has not rated
    ///
    /// Only slots holding exactly zero are candidates. Scored books come first
    /// by descending score; equal scores keep catalog order.
    ///
    /// `user`, `scores` and `catalog` must all have the catalog's width.
    pub fn rank(
        &self,
        user: &RatingVector,
        scores: &[Score],
        catalog: &Catalog,
    ) -> Vec<RecommendationEntry> {
        debug_assert_eq!(scores.len(), user.len());
        debug_assert_eq!(catalog.len(), user.len());

        let mut scored: Vec<(usize, f64)> = Vec::new();
        let mut unscored: Vec<usize> = Vec::new();

        for position in user.unrated_positions() {
            match scores.get(position) {
                Some(Score::Scored(value)) => scored.push((position, *value)),
                Some(Score::NoSignal) => unscored.push(position),
                None => {}
            }
        }

        // Stable, so ties stay in catalog order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let tail = match self.policy {
            NoSignalPolicy::Exclude => Vec::new(),
            NoSignalPolicy::RankLast => unscored,
        };

        scored
            .into_iter()
            .map(|(position, value)| (position, Score::Scored(value)))
            .chain(tail.into_iter().map(|position| (position, Score::NoSignal)))
            .filter_map(|(position, score)| {
                catalog.get(position).map(|book| RecommendationEntry {
                    book_id: book.book_id,
                    title: book.title.clone(),
                    score,
                })
            })
            .collect()
    }
}
