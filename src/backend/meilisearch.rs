//! Meilisearch backend
//!
//! Forwards every operation to the engine's HTTP API through [`HttpClient`].

use super::models::{
    CurrentSearchBody, EngineHealth, IndexInfo, Listing, SearchRequest, SearchResponse,
};
use super::traits::SearchBackend;
use crate::config::{ApiVersion, MeilisearchSettings};
use crate::error::{GatewayError, Result};
use crate::network::HttpClient;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Search backend talking to a Meilisearch server
pub struct Meilisearch {
    client: HttpClient,
    batch_size: usize,
    api_version: ApiVersion,
}

impl Meilisearch {
    /// Create a backend from an HTTP client bound to the engine host
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            batch_size: MeilisearchSettings::default().documents_batch_size,
            api_version: ApiVersion::default(),
        }
    }

    /// Create a backend using the configured document batch size
    pub fn with_settings(client: HttpClient, settings: &MeilisearchSettings) -> Self {
        Self {
            client,
            batch_size: settings.documents_batch_size.max(1),
            api_version: settings.api_version,
        }
    }

    /// Fetch a paginated list endpoint until a short page comes back.
    ///
    /// When `bare_is_complete` is set, a bare array response is taken as the
    /// whole list: older engines ignore paging parameters on that endpoint.
    async fn fetch_all<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        index_uid: Option<&str>,
        bare_is_complete: bool,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let params = [
                ("offset", offset.to_string()),
                ("limit", self.batch_size.to_string()),
            ];
            let listing: Listing<T> = self.client.get_json(segments, &params, index_uid).await?;

            if bare_is_complete && !listing.is_page() {
                return Ok(listing.into_items());
            }

            let page = listing.into_items();
            let fetched = page.len();
            items.extend(page);

            if fetched < self.batch_size {
                break;
            }
            offset += fetched;
        }

        Ok(items)
    }
}

/// Index uids are made of ASCII alphanumerics, `-` and `_`; no index can
/// exist under any other name.
fn check_uid(uid: &str) -> Result<()> {
    let valid = !uid.is_empty()
        && uid
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if valid {
        Ok(())
    } else {
        Err(GatewayError::IndexNotFound(uid.to_string()))
    }
}

#[async_trait]
impl SearchBackend for Meilisearch {
    async fn search(&self, index_uid: &str, request: &SearchRequest) -> Result<SearchResponse> {
        debug!(
            "Searching index '{}' for {:?} (offset {}, limit {})",
            index_uid, request.q, request.offset, request.limit
        );

        check_uid(index_uid)?;

        let segments = ["indexes", index_uid, "search"];
        match self.api_version {
            ApiVersion::Legacy => {
                self.client
                    .post_json(&segments, request, Some(index_uid))
                    .await
            }
            ApiVersion::Current => {
                let body = CurrentSearchBody::from(request);
                self.client.post_json(&segments, &body, Some(index_uid)).await
            }
        }
    }

    async fn list_indexes(&self) -> Result<Vec<IndexInfo>> {
        self.fetch_all(&["indexes"], None, true).await
    }

    async fn get_index(&self, uid: &str) -> Result<IndexInfo> {
        check_uid(uid)?;
        self.client.get_json(&["indexes", uid], &[], Some(uid)).await
    }

    async fn list_documents(&self, index_uid: &str) -> Result<Vec<Value>> {
        check_uid(index_uid)?;

        let segments = ["indexes", index_uid, "documents"];
        let documents: Vec<Value> = self.fetch_all(&segments, Some(index_uid), false).await?;
        debug!("Fetched {} documents from '{}'", documents.len(), index_uid);
        Ok(documents)
    }

    async fn health(&self) -> Result<EngineHealth> {
        self.client.get_json(&["health"], &[], None).await
    }
}
