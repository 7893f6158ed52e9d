//! GraphQL module
//!
//! Declares the query schema over the search backend. Resolvers forward
//! their arguments to the backend and return its responses unmodified.

mod error;
mod query;
mod schema;
mod types;

pub use query::Query;
pub use schema::{build_schema, GatewaySchema};
pub use types::{BackendRef, DefaultIndex, Engine, Index, SearchResult};
