//! HTTP handlers for movie CRUD.

pub mod movies;
pub use movies::*;
