//! Application state shared across handlers

use crate::config::Settings;
use crate::graphql::{build_schema, BackendRef, GatewaySchema};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search backend, constructed once at startup
    pub backend: BackendRef,
    /// Executable GraphQL schema
    pub schema: GatewaySchema,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, backend: BackendRef) -> Self {
        let schema = build_schema(backend.clone(), settings.meilisearch.default_index.clone());

        Self {
            settings: Arc::new(settings),
            backend,
            schema,
        }
    }

    /// Whether the GraphiQL console is served
    pub fn graphiql_enabled(&self) -> bool {
        self.settings.server.graphiql
    }
}
