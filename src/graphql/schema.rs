//! Schema construction

use super::query::Query;
use super::types::{BackendRef, DefaultIndex};
use async_graphql::{EmptyMutation, EmptySubscription, Schema};

/// The gateway's executable schema
pub type GatewaySchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Build the schema around a backend handle.
///
/// The backend is shared by every request for the life of the process.
pub fn build_schema(backend: BackendRef, default_index: impl Into<String>) -> GatewaySchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(backend)
        .data(DefaultIndex(default_index.into()))
        .finish()
}
