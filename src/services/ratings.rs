use std::sync::Arc;

use crate::{
    db::RatingStore,
    error::{AppError, AppResult},
    models::{RatingRecord, RatingSubmission},
};

/// Stores a reader's ratings for later recommendations
///
/// The vector must span the whole catalog, stay within `0..=max_rating` and
/// rate at least one book.
pub async fn record_rating(
    store: Arc<dyn RatingStore>,
    submission: RatingSubmission,
    max_rating: i32,
) -> AppResult<RatingRecord> {
    let catalog = store.fetch_catalog().await?;
    let ratings = submission.ratings;

    ratings.ensure_width(catalog.len(), "submitted rating vector")?;
    ratings.ensure_range(max_rating)?;
    if ratings.rated_count() == 0 {
        return Err(AppError::InvalidInput(
            "Must rate at least one book".to_string(),
        ));
    }

    let record = store.record_rating(&ratings).await?;

    tracing::info!(
        store = store.name(),
        user_id = record.user_id,
        rated = ratings.rated_count(),
        "Rating recorded"
    );

    Ok(record)
}
