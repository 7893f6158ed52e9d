//! In-memory backend for exercising the GraphQL layer without an engine

use super::models::{EngineHealth, IndexInfo, SearchRequest, SearchResponse};
use super::traits::SearchBackend;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

/// Backend serving fixed indexes and recording the requests it receives
pub struct StaticBackend {
    indexes: Vec<(IndexInfo, Vec<Value>)>,
    filterable: Vec<String>,
    available: bool,
    requests: Mutex<Vec<(String, SearchRequest)>>,
}

impl StaticBackend {
    pub fn new() -> Self {
        Self {
            indexes: Vec::new(),
            filterable: Vec::new(),
            available: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Backend holding a small `movies` index with `genres` filterable
    pub fn movies() -> Self {
        Self::new()
            .with_index(
                IndexInfo::new("movies").with_primary_key("id"),
                vec![
                    json!({"id": 1, "title": "The Matrix", "genres": ["Action", "Science Fiction"]}),
                    json!({"id": 2, "title": "The Matrix Reloaded", "genres": ["Action"]}),
                    json!({"id": 3, "title": "Amélie", "genres": ["Comedy", "Romance"]}),
                ],
            )
            .with_index(IndexInfo::new("books"), vec![])
            .with_filterable("genres")
    }

    pub fn with_index(mut self, info: IndexInfo, documents: Vec<Value>) -> Self {
        self.indexes.push((info, documents));
        self
    }

    pub fn with_filterable(mut self, attribute: &str) -> Self {
        self.filterable.push(attribute.to_string());
        self
    }

    /// Every call fails as if the engine were down
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Search requests received so far, with their target index
    pub fn requests(&self) -> Vec<(String, SearchRequest)> {
        self.requests.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(GatewayError::SearchEngineUnavailable(
                "connection refused".to_string(),
            ))
        }
    }

    fn find(&self, uid: &str) -> Result<&(IndexInfo, Vec<Value>)> {
        self.indexes
            .iter()
            .find(|(info, _)| info.uid == uid)
            .ok_or_else(|| GatewayError::IndexNotFound(uid.to_string()))
    }
}

#[async_trait]
impl SearchBackend for StaticBackend {
    async fn search(&self, index_uid: &str, request: &SearchRequest) -> Result<SearchResponse> {
        self.check_available()?;
        self.requests
            .lock()
            .unwrap()
            .push((index_uid.to_string(), request.clone()));

        let (_, documents) = self.find(index_uid)?;

        if let Some(ref filter) = request.filter {
            let attribute = filter.split_whitespace().next().unwrap_or_default();
            if !self.filterable.iter().any(|a| a == attribute) {
                return Err(GatewayError::InvalidArgument {
                    code: "invalid_filter".to_string(),
                    message: format!("Attribute `{}` is not filterable.", attribute),
                });
            }
        }

        let needle = request.q.clone().unwrap_or_default().to_lowercase();
        let matching: Vec<Value> = documents
            .iter()
            .filter(|doc| {
                doc.get("title")
                    .and_then(Value::as_str)
                    .map(|t| t.to_lowercase().contains(&needle))
                    .unwrap_or(needle.is_empty())
            })
            .cloned()
            .collect();

        Ok(SearchResponse {
            query: request.q.clone().unwrap_or_default(),
            nb_hits: matching.len(),
            hits: matching
                .into_iter()
                .skip(request.offset)
                .take(request.limit)
                .collect(),
            facets_distribution: request.facets_distribution.as_ref().map(|_| json!({})),
            offset: request.offset,
            limit: request.limit,
            exhaustive_nb_hits: Some(true),
            exhaustive_facets_count: None,
            processing_time_ms: 0,
        })
    }

    async fn list_indexes(&self) -> Result<Vec<IndexInfo>> {
        self.check_available()?;
        Ok(self.indexes.iter().map(|(info, _)| info.clone()).collect())
    }

    async fn get_index(&self, uid: &str) -> Result<IndexInfo> {
        self.check_available()?;
        Ok(self.find(uid)?.0.clone())
    }

    async fn list_documents(&self, index_uid: &str) -> Result<Vec<Value>> {
        self.check_available()?;
        Ok(self.find(index_uid)?.1.clone())
    }

    async fn health(&self) -> Result<EngineHealth> {
        self.check_available()?;
        Ok(EngineHealth {
            status: "available".to_string(),
        })
    }
}
