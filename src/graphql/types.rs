//! GraphQL output types and argument bundles

use crate::backend::{
    split_sort, IndexInfo, SearchBackend, SearchRequest, SearchResponse, DEFAULT_CROP_LENGTH,
    DEFAULT_LIMIT, DEFAULT_MATCHES, DEFAULT_OFFSET,
};
use async_graphql::{Context, ErrorExtensions, Json, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Shared handle to the search backend stored in the schema data
pub type BackendRef = Arc<dyn SearchBackend>;

/// Index searched by the root `search` field
#[derive(Debug, Clone)]
pub struct DefaultIndex(pub String);

pub(crate) fn backend<'a>(ctx: &Context<'a>) -> Result<&'a BackendRef> {
    ctx.data::<BackendRef>()
}

///////////////////////////////////////////////////////////////////////////////
// Search arguments
///////////////////////////////////////////////////////////////////////////////

/// Field arguments of a `search` field, before conversion to the engine
/// request shape.
///
/// Both `search` fields declare their argument defaults from the constants
/// in `crate::backend`, so the two shapes cannot disagree.
pub(crate) struct SearchArgs {
    pub q: Option<String>,
    pub offset: usize,
    pub limit: usize,
    pub filter: Option<String>,
    pub facets_distribution: Option<Vec<String>>,
    pub attributes_to_retrieve: Vec<String>,
    pub attributes_to_crop: Option<Vec<String>>,
    pub crop_length: usize,
    pub attributes_to_highlight: Option<Vec<String>>,
    pub matches: bool,
    pub sort: Option<String>,
}

impl From<SearchArgs> for SearchRequest {
    fn from(args: SearchArgs) -> Self {
        SearchRequest {
            q: args.q,
            offset: args.offset,
            limit: args.limit,
            filter: args.filter,
            facets_distribution: args.facets_distribution,
            attributes_to_retrieve: args.attributes_to_retrieve,
            attributes_to_crop: args.attributes_to_crop,
            crop_length: args.crop_length,
            attributes_to_highlight: args.attributes_to_highlight,
            matches: args.matches,
            sort: args.sort.as_deref().map(split_sort),
        }
    }
}

pub(crate) fn default_attributes() -> Vec<String> {
    vec![crate::backend::ALL_ATTRIBUTES.to_string()]
}

/// Forward a search to the backend and coerce the response
pub(crate) async fn run_search(
    ctx: &Context<'_>,
    index_uid: &str,
    args: SearchArgs,
) -> Result<Option<SearchResult>> {
    let request = SearchRequest::from(args);
    debug!("Resolving search on '{}'", index_uid);

    let response = backend(ctx)?
        .search(index_uid, &request)
        .await
        .map_err(|e| e.extend())?;

    Ok(Some(response.into()))
}

///////////////////////////////////////////////////////////////////////////////
// SearchResult
///////////////////////////////////////////////////////////////////////////////

/// Search results, as returned by the engine
#[derive(SimpleObject, Debug, Clone)]
pub struct SearchResult {
    /// Query string the results were computed for
    pub query: String,
    /// Matching documents
    pub hits: Json<Vec<Value>>,
    /// Count of matches per facet value
    pub facets_distribution: Option<Json<Value>>,
    /// Number of documents skipped
    pub offset: usize,
    /// Maximum number of documents returned
    pub limit: usize,
    /// Total number of matches
    pub nb_hits: usize,
    /// Whether `nbHits` is exact
    pub exhaustive_nb_hits: Option<bool>,
    /// Whether facet counts are exact
    pub exhaustive_facets_count: Option<bool>,
    /// Processing time of the query in milliseconds
    pub processing_time_ms: u64,
}

impl From<SearchResponse> for SearchResult {
    fn from(response: SearchResponse) -> Self {
        Self {
            query: response.query,
            hits: Json(response.hits),
            facets_distribution: response.facets_distribution.map(Json),
            offset: response.offset,
            limit: response.limit,
            nb_hits: response.nb_hits,
            exhaustive_nb_hits: response.exhaustive_nb_hits,
            exhaustive_facets_count: response.exhaustive_facets_count,
            processing_time_ms: response.processing_time_ms,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
// Meilisearch
///////////////////////////////////////////////////////////////////////////////

/// Handle to the search engine
pub struct Engine;

#[Object(name = "Meilisearch")]
impl Engine {
    /// Look up an index by name
    async fn index(&self, ctx: &Context<'_>, name: String) -> Result<Option<Index>> {
        let info = backend(ctx)?
            .get_index(&name)
            .await
            .map_err(|e| e.extend())?;
        Ok(Some(Index::new(info)))
    }

    /// All indexes known to the engine
    async fn indexes(&self, ctx: &Context<'_>) -> Result<Vec<Index>> {
        let indexes = backend(ctx)?
            .list_indexes()
            .await
            .map_err(|e| e.extend())?;
        Ok(indexes.into_iter().map(Index::new).collect())
    }
}

///////////////////////////////////////////////////////////////////////////////
// Index
///////////////////////////////////////////////////////////////////////////////

/// A named, independently searchable collection of documents
pub struct Index {
    info: IndexInfo,
}

impl Index {
    pub fn new(info: IndexInfo) -> Self {
        Self { info }
    }
}

#[Object]
impl Index {
    /// Unique name of the index
    async fn uid(&self) -> &str {
        &self.info.uid
    }

    /// Attribute holding the document identifier
    async fn primary_key(&self) -> Option<&str> {
        self.info.primary_key.as_deref()
    }

    async fn created_at(&self) -> Option<DateTime<Utc>> {
        self.info.created_at
    }

    async fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.info.updated_at
    }

    /// Search this index
    async fn search(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Query string")] q: Option<String>,
        #[graphql(desc = "Number of documents to skip", default_with = "DEFAULT_OFFSET")]
        offset: usize,
        #[graphql(desc = "Maximum number of documents returned", default_with = "DEFAULT_LIMIT")]
        limit: usize,
        #[graphql(desc = "Filter queries by an attribute's value")] filter: Option<String>,
        #[graphql(desc = "Display the count of matches per facet")]
        facets_distribution: Option<Vec<String>>,
        #[graphql(
            desc = "Attributes to display in the returned documents",
            default_with = "default_attributes()"
        )]
        attributes_to_retrieve: Vec<String>,
        #[graphql(desc = "Attributes whose values have to be cropped")]
        attributes_to_crop: Option<Vec<String>>,
        #[graphql(desc = "Maximum field value length", default_with = "DEFAULT_CROP_LENGTH")]
        crop_length: usize,
        #[graphql(desc = "Highlight matching terms contained in an attribute")]
        attributes_to_highlight: Option<Vec<String>>,
        #[graphql(desc = "Return matching terms location", default_with = "DEFAULT_MATCHES")]
        matches: bool,
        #[graphql(desc = "Sort by attribute values, as comma-separated attribute:direction pairs")]
        sort: Option<String>,
    ) -> Result<Option<SearchResult>> {
        let args = SearchArgs {
            q,
            offset,
            limit,
            filter,
            facets_distribution,
            attributes_to_retrieve,
            attributes_to_crop,
            crop_length,
            attributes_to_highlight,
            matches,
            sort,
        };
        run_search(ctx, &self.info.uid, args).await
    }

    /// Every document stored in the index
    async fn documents(&self, ctx: &Context<'_>) -> Result<Vec<Json<Value>>> {
        let documents = backend(ctx)?
            .list_documents(&self.info.uid)
            .await
            .map_err(|e| e.extend())?;
        Ok(documents.into_iter().map(Json).collect())
    }
}
