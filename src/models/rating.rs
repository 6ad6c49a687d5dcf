use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Value stored in a rating slot the user has not rated
pub const UNRATED: i32 = 0;

/// One rating per catalog book, in catalog order. `0` means unrated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RatingVector(Vec<i32>);

impl RatingVector {
    pub fn new(ratings: Vec<i32>) -> Self {
        Self(ratings)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Catalog positions the user has not rated
    pub fn unrated_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &r)| r == UNRATED)
            .map(|(i, _)| i)
    }

    pub fn rated_count(&self) -> usize {
        self.0.iter().filter(|&&r| r != UNRATED).count()
    }

    /// Checks the vector against the catalog width
    pub fn ensure_width(&self, expected: usize, context: &str) -> AppResult<()> {
        if self.len() != expected {
            return Err(AppError::shape_mismatch(context, expected, self.len()));
        }
        Ok(())
    }

    /// Checks every slot lies in `0..=max_rating`
    pub fn ensure_range(&self, max_rating: i32) -> AppResult<()> {
        if let Some((position, rating)) = self
            .0
            .iter()
            .enumerate()
            .find(|(_, &r)| !(UNRATED..=max_rating).contains(&r))
        {
            return Err(AppError::InvalidInput(format!(
                "Rating {} at position {} is outside 0..={}",
                rating, position, max_rating
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for RatingVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Rating vectors of every peer, all `width` slots wide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingDataset {
    width: usize,
    rows: Vec<RatingVector>,
}

impl RatingDataset {
    /// Builds a dataset, failing if any row disagrees with `width`
    pub fn new(width: usize, rows: Vec<RatingVector>) -> AppResult<Self> {
        for (index, row) in rows.iter().enumerate() {
            row.ensure_width(width, &format!("peer rating row {}", index))?;
        }
        Ok(Self { width, rows })
    }

    /// Builds a dataset from stored records
    ///
    /// A stored row whose width disagrees with the catalog is a data problem
    /// on our side, not the caller's, so it surfaces as `Internal`.
    pub fn from_records(width: usize, records: Vec<RatingRecord>) -> AppResult<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            if record.ratings.len() != width {
                tracing::error!(
                    user_id = record.user_id,
                    slots = record.ratings.len(),
                    books = width,
                    "Stored rating width does not match catalog"
                );
                return Err(AppError::Internal(format!(
                    "Stored rating of user {} has {} slots, catalog has {} books",
                    record.user_id,
                    record.ratings.len(),
                    width
                )));
            }
            rows.push(record.ratings);
        }
        Ok(Self { width, rows })
    }

    /// An empty dataset for a catalog of `width` books
    pub fn empty(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[RatingVector] {
        &self.rows
    }

    pub fn peer_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A persisted rating submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingRecord {
    pub user_id: i32,
    pub rated_at: DateTime<Utc>,
    pub ratings: RatingVector,
}
