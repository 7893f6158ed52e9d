//! The search capability every backend provides

use super::models::{EngineHealth, IndexInfo, SearchRequest, SearchResponse};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Read-only operations the gateway forwards to a search engine.
///
/// Implementations return engine data unmodified; the GraphQL layer only
/// coerces it to output types.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Search one index
    async fn search(&self, index_uid: &str, request: &SearchRequest) -> Result<SearchResponse>;

    /// All indexes, in engine-reported order
    async fn list_indexes(&self) -> Result<Vec<IndexInfo>>;

    /// Look up a single index; fails with `IndexNotFound` when absent
    async fn get_index(&self, uid: &str) -> Result<IndexInfo>;

    /// Every document of an index, unpaginated
    async fn list_documents(&self, index_uid: &str) -> Result<Vec<Value>>;

    /// Engine liveness
    async fn health(&self) -> Result<EngineHealth>;
}
