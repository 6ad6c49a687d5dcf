pub mod aggregator;
pub mod ranker;
pub mod ratings;
pub mod recommendations;
pub mod similarity;

pub use ranker::NoSignalPolicy;
pub use recommendations::RecommendationEngine;
