use serde::{Deserialize, Serialize};

/// Predicted preference for one book
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// Similarity-weighted average rating
    Scored(f64),
    /// No peer with positive similarity rated the book
    NoSignal,
}

impl Score {
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Scored(v) => Some(*v),
            Score::NoSignal => None,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, Score::Scored(_))
    }
}

impl Serialize for Score {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?
            .map(Score::Scored)
            .unwrap_or(Score::NoSignal))
    }
}

/// A ranked, not yet rated book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub book_id: i32,
    pub title: String,
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_serializes_as_nullable_number() {
        assert_eq!(serde_json::to_string(&Score::Scored(4.5)).unwrap(), "4.5");
        assert_eq!(serde_json::to_string(&Score::NoSignal).unwrap(), "null");

        let back: Score = serde_json::from_str("null").unwrap();
        assert_eq!(back, Score::NoSignal);
    }
}
