use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    error::AppResult,
    models::{Book, Catalog, RatingRecord, RatingVector},
};

use super::RatingStore;

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    user_id: i32,
    rated_at: DateTime<Utc>,
    ratings: Vec<i32>,
}

impl From<RatingRow> for RatingRecord {
    fn from(row: RatingRow) -> Self {
        RatingRecord {
            user_id: row.user_id,
            rated_at: row.rated_at,
            ratings: RatingVector::new(row.ratings),
        }
    }
}

/// Rating store backed by the `books` and `ratings` tables
///
/// Each operation checks out its own connection from the pool; the
/// connection goes back to the pool when the operation returns, on success
/// or error alike.
#[derive(Clone)]
pub struct PgRatingStore {
    pool: PgPool,
}

impl PgRatingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStore for PgRatingStore {
    async fn fetch_catalog(&self) -> AppResult<Catalog> {
        let mut conn = self.pool.acquire().await?;

        let books = sqlx::query_as::<_, Book>("SELECT book_id, title FROM books ORDER BY book_id")
            .fetch_all(&mut *conn)
            .await?;

        tracing::debug!(books = books.len(), "Catalog fetched");
        Ok(Catalog::new(books))
    }

    async fn fetch_rating_dataset(&self) -> AppResult<Vec<RatingRecord>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, RatingRow>(
            "SELECT user_id, rated_at, ratings FROM ratings ORDER BY user_id",
        )
        .fetch_all(&mut *conn)
        .await?;

        tracing::debug!(rows = rows.len(), "Rating dataset fetched");
        Ok(rows.into_iter().map(RatingRecord::from).collect())
    }

    async fn record_rating(&self, ratings: &RatingVector) -> AppResult<RatingRecord> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, RatingRow>(
            r#"
            INSERT INTO ratings (rated_at, ratings)
            VALUES (NOW(), $1)
            RETURNING user_id, rated_at, ratings
            "#,
        )
        .bind(ratings.as_slice().to_vec())
        .fetch_one(&mut *conn)
        .await?;

        tracing::info!(user_id = row.user_id, "Rating stored");
        Ok(row.into())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
