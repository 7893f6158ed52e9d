//! Request and response shapes of the search engine API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of documents skipped
pub const DEFAULT_OFFSET: usize = 0;
/// Default maximum number of hits returned
pub const DEFAULT_LIMIT: usize = 20;
/// Default maximum length of a cropped attribute
pub const DEFAULT_CROP_LENGTH: usize = 200;
/// Match positions are left out unless asked for
pub const DEFAULT_MATCHES: bool = false;
/// Wildcard selecting every attribute
pub const ALL_ATTRIBUTES: &str = "*";

/// Search parameters in the engine's native JSON shape.
///
/// Absent optionals are omitted from the request body so the engine applies
/// its own behavior for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Search terms; absent means match-all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    pub offset: usize,
    pub limit: usize,
    /// Filter expression, forwarded unparsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets_distribution: Option<Vec<String>>,
    pub attributes_to_retrieve: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_crop: Option<Vec<String>>,
    pub crop_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<Vec<String>>,
    /// Include match positions per hit
    pub matches: bool,
    /// `attribute:direction` pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
}

impl SearchRequest {
    /// Request with every parameter at its default
    pub fn new() -> Self {
        Self {
            q: None,
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
            filter: None,
            facets_distribution: None,
            attributes_to_retrieve: vec![ALL_ATTRIBUTES.to_string()],
            attributes_to_crop: None,
            crop_length: DEFAULT_CROP_LENGTH,
            attributes_to_highlight: None,
            matches: DEFAULT_MATCHES,
            sort: None,
        }
    }

    /// Set the search terms
    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Set the sort from a comma-separated `attribute:direction` list
    pub fn sort_expression(mut self, expr: &str) -> Self {
        self.sort = Some(split_sort(expr));
        self
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Search body for engines from v0.28 on, which take `facets` and
/// `showMatchesPosition` in place of `facetsDistribution` and `matches`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CurrentSearchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    offset: usize,
    limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facets: Option<&'a [String]>,
    attributes_to_retrieve: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes_to_crop: Option<&'a [String]>,
    crop_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes_to_highlight: Option<&'a [String]>,
    show_matches_position: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a [String]>,
}

impl<'a> From<&'a SearchRequest> for CurrentSearchBody<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        Self {
            q: request.q.as_deref(),
            offset: request.offset,
            limit: request.limit,
            filter: request.filter.as_deref(),
            facets: request.facets_distribution.as_deref(),
            attributes_to_retrieve: &request.attributes_to_retrieve,
            attributes_to_crop: request.attributes_to_crop.as_deref(),
            crop_length: request.crop_length,
            attributes_to_highlight: request.attributes_to_highlight.as_deref(),
            show_matches_position: request.matches,
            sort: request.sort.as_deref(),
        }
    }
}

/// Split `"year:desc, title:asc"` into `["year:desc", "title:asc"]`
pub fn split_sort(expr: &str) -> Vec<String> {
    expr.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(str::to_string)
        .collect()
}

/// Search results as returned by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub hits: Vec<Value>,
    #[serde(default, alias = "facetDistribution")]
    pub facets_distribution: Option<Value>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default, alias = "estimatedTotalHits", alias = "totalHits")]
    pub nb_hits: usize,
    #[serde(default)]
    pub exhaustive_nb_hits: Option<bool>,
    #[serde(default)]
    pub exhaustive_facets_count: Option<bool>,
    pub processing_time_ms: u64,
}

/// Index metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    pub uid: String,
    #[serde(default)]
    pub primary_key: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl IndexInfo {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            primary_key: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = Some(key.into());
        self
    }
}

/// Engine liveness as reported by its health endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineHealth {
    pub status: String,
}

/// A list endpoint response: a bare array on older engines, a page object
/// on newer ones
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Page { results: Vec<T> },
}

impl<T> Listing<T> {
    pub(crate) fn is_page(&self) -> bool {
        matches!(self, Listing::Page { .. })
    }

    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Listing::Page { results } => results,
            Listing::Bare(items) => items,
        }
    }
}
