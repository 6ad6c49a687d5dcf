pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryRatingStore;
pub use postgres::{create_pool, PgRatingStore};
pub use store::RatingStore;
