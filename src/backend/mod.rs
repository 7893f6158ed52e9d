//! Search backend module
//!
//! Defines the SearchBackend trait the GraphQL resolvers call into and the
//! Meilisearch implementation that forwards to the engine's HTTP API.

mod meilisearch;
mod models;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use meilisearch::Meilisearch;
pub use models::*;
pub use traits::SearchBackend;
