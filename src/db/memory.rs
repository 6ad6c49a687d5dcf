use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{Book, Catalog, RatingRecord, RatingVector},
};

use super::RatingStore;

struct Inner {
    records: Vec<RatingRecord>,
    next_user_id: i32,
}

/// Rating store held entirely in process memory
///
/// Used by tests and for running the service without a database.
pub struct InMemoryRatingStore {
    catalog: Catalog,
    inner: RwLock<Inner>,
}

impl InMemoryRatingStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            catalog: Catalog::new(books),
            inner: RwLock::new(Inner {
                records: Vec::new(),
                next_user_id: 1,
            }),
        }
    }

    /// Creates a store pre-loaded with peer rating rows
    pub fn with_ratings(books: Vec<Book>, rows: Vec<Vec<i32>>) -> Self {
        let records: Vec<RatingRecord> = rows
            .into_iter()
            .enumerate()
            .map(|(i, ratings)| RatingRecord {
                user_id: i as i32 + 1,
                rated_at: Utc::now(),
                ratings: RatingVector::new(ratings),
            })
            .collect();
        let next_user_id = records.len() as i32 + 1;

        Self {
            catalog: Catalog::new(books),
            inner: RwLock::new(Inner {
                records,
                next_user_id,
            }),
        }
    }
}

#[async_trait]
impl RatingStore for InMemoryRatingStore {
    async fn fetch_catalog(&self) -> AppResult<Catalog> {
        Ok(self.catalog.clone())
    }

    async fn fetch_rating_dataset(&self) -> AppResult<Vec<RatingRecord>> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn record_rating(&self, ratings: &RatingVector) -> AppResult<RatingRecord> {
        let mut inner = self.inner.write().await;

        let record = RatingRecord {
            user_id: inner.next_user_id,
            rated_at: Utc::now(),
            ratings: ratings.clone(),
        };
        inner.next_user_id += 1;
        inner.records.push(record.clone());

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_rating_assigns_sequential_ids() {
        let store = InMemoryRatingStore::with_ratings(
            vec![Book::new(1, "A Study in Scarlet")],
            vec![vec![4]],
        );

        let record = store.record_rating(&RatingVector::new(vec![2])).await.unwrap();
        assert_eq!(record.user_id, 2);

        let dataset = store.fetch_rating_dataset().await.unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[1].ratings.as_slice(), &[2]);
    }

    #[tokio::test]
    async fn test_fetch_catalog_keeps_order() {
        let store = InMemoryRatingStore::new(vec![
            Book::new(3, "The Valley of Fear"),
            Book::new(1, "A Study in Scarlet"),
        ]);

        let catalog = store.fetch_catalog().await.unwrap();
        assert_eq!(catalog.books()[0].book_id, 3);
    }
}
