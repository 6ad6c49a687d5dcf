pub mod book;
pub mod rating;
pub mod recommendation;

pub use book::{Book, Catalog};
pub use rating::{RatingDataset, RatingRecord, RatingVector, UNRATED};
pub use recommendation::{RecommendationEntry, Score};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request for recommendations based on a reader's ratings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationRequest {
    /// One rating per catalog book, 0 for unread
    pub ratings: RatingVector,
    /// Maximum number of recommendations to return
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationEntry>,
}

/// Request to store a reader's ratings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatingSubmission {
    pub ratings: RatingVector,
}

/// Confirmation of a stored rating
#[derive(Debug, Serialize, Deserialize)]
pub struct RatingConfirmation {
    pub user_id: i32,
    pub rated_at: DateTime<Utc>,
    pub ratings: RatingVector,
    pub message: String,
}

impl From<RatingRecord> for RatingConfirmation {
    fn from(record: RatingRecord) -> Self {
        Self {
            message: format!("Rating inserted: {}", record.ratings),
            user_id: record.user_id,
            rated_at: record.rated_at,
            ratings: record.ratings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_request_limit_is_optional() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"ratings":[0,5,0]}"#).unwrap();
        assert_eq!(request.ratings.as_slice(), &[0, 5, 0]);
        assert_eq!(request.limit, None);
    }

    #[test]
    fn test_confirmation_message_echoes_ratings() {
        let record = RatingRecord {
            user_id: 42,
            rated_at: Utc::now(),
            ratings: RatingVector::new(vec![5, 0, 3]),
        };
        let confirmation = RatingConfirmation::from(record);
        assert_eq!(confirmation.user_id, 42);
        assert_eq!(confirmation.message, "Rating inserted: [5, 0, 3]");
    }
}
