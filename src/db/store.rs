//! Persistence collaborator for the recommender
//!
//! The recommendation pipeline only reads a snapshot of the catalog and the
//! rating history; storing new ratings happens independently of it.

use crate::{
    error::AppResult,
    models::{Catalog, RatingRecord, RatingVector},
};

/// Source of the book catalog and the readers' rating history
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingStore: Send + Sync {
    /// All books in catalog order
    async fn fetch_catalog(&self) -> AppResult<Catalog>;

    /// Every stored rating submission
    ///
    /// Rows are returned as stored; width checks against the catalog are the
    /// caller's job.
    async fn fetch_rating_dataset(&self) -> AppResult<Vec<RatingRecord>>;

    /// Persists a new rating vector and returns the stored record
    async fn record_rating(&self, ratings: &RatingVector) -> AppResult<RatingRecord>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}
