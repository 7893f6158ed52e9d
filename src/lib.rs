//! meili-gateway: a GraphQL query surface over a Meilisearch server
//!
//! Index listing, index lookup, document search with faceted filtering and
//! raw document retrieval, each forwarded verbatim to the search engine.

pub mod backend;
pub mod config;
pub mod error;
pub mod graphql;
pub mod network;
pub mod web;

pub use backend::{Meilisearch, SearchBackend};
pub use config::Settings;
pub use error::GatewayError;
pub use graphql::{build_schema, GatewaySchema};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
