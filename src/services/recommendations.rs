use std::sync::Arc;

use crate::{
    db::RatingStore,
    error::{AppError, AppResult},
    models::{
        Catalog, RatingDataset, RatingVector, RecommendationEntry, RecommendationRequest,
    },
};

use super::{
    aggregator::PreferenceAggregator,
    ranker::{NoSignalPolicy, RecommendationRanker},
    similarity::{Jaccard, SimilarityMetric},
};

/// Collaborative-filtering pipeline: aggregate peer ratings, then rank
///
/// Holds no per-request state; one instance serves every request.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<M = Jaccard> {
    aggregator: PreferenceAggregator<M>,
    ranker: RecommendationRanker,
    max_rating: i32,
}

impl RecommendationEngine<Jaccard> {
    pub fn new(policy: NoSignalPolicy, max_rating: i32) -> Self {
        Self::with_metric(Jaccard, policy, max_rating)
    }
}

impl<M: SimilarityMetric> RecommendationEngine<M> {
    pub fn with_metric(metric: M, policy: NoSignalPolicy, max_rating: i32) -> Self {
        Self {
            aggregator: PreferenceAggregator::new(metric),
            ranker: RecommendationRanker::new(policy),
            max_rating,
        }
    }

    pub fn max_rating(&self) -> i32 {
        self.max_rating
    }

    /// Checks a submitted rating vector against the catalog
    pub fn validate(&self, ratings: &RatingVector, catalog: &Catalog) -> AppResult<()> {
        ratings.ensure_width(catalog.len(), "user rating vector")?;
        ratings.ensure_range(self.max_rating)
    }

    /// Ranks the books `user` has not rated
    ///
    /// Fails with `ShapeMismatch` before any scoring if the user vector or the
    /// dataset disagree with the catalog width.
    pub fn recommend(
        &self,
        user: &RatingVector,
        catalog: &Catalog,
        dataset: &RatingDataset,
    ) -> AppResult<Vec<RecommendationEntry>> {
        user.ensure_width(catalog.len(), "user rating vector")?;
        if dataset.width() != catalog.len() {
            return Err(AppError::shape_mismatch(
                "rating dataset",
                catalog.len(),
                dataset.width(),
            ));
        }

        let scores = self.aggregator.aggregate(user, dataset);
        Ok(self.ranker.rank(user, &scores, catalog))
    }
}

/// Generates book recommendations for a reader
///
/// Reads a fresh snapshot of the catalog and all stored ratings, then scores
/// every unread book by how similar readers rated it.
pub async fn get_recommendations<M: SimilarityMetric>(
    store: Arc<dyn RatingStore>,
    engine: &RecommendationEngine<M>,
    request: RecommendationRequest,
) -> AppResult<Vec<RecommendationEntry>> {
    let catalog = store.fetch_catalog().await?;
    engine.validate(&request.ratings, &catalog)?;

    let records = store.fetch_rating_dataset().await?;
    let dataset = RatingDataset::from_records(catalog.len(), records)?;

    tracing::info!(
        store = store.name(),
        books = catalog.len(),
        peers = dataset.peer_count(),
        rated = request.ratings.rated_count(),
        "Computing recommendations"
    );

    let mut entries = engine.recommend(&request.ratings, &catalog, &dataset)?;
    if let Some(limit) = request.limit {
        entries.truncate(limit);
    }

    tracing::info!(recommended = entries.len(), "Recommendations computed");

    Ok(entries)
}
