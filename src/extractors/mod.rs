//! Request extractors.

mod movie_id;
pub use movie_id::MovieId;
