//! Root query type

use super::types::{default_attributes, run_search, DefaultIndex, Engine, SearchArgs, SearchResult};
use crate::backend::{DEFAULT_CROP_LENGTH, DEFAULT_LIMIT, DEFAULT_MATCHES, DEFAULT_OFFSET};
use async_graphql::{Context, Object, Result};

////////////////////////////////////////////////////////////////////////////////
// Query
////////////////////////////////////////////////////////////////////////////////

pub struct Query;

#[Object]
impl Query {
    /// Search the default index.
    ///
    /// Shortcut for `meilisearch { index(name: <default>) { search } }`
    /// without the index lookup.
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
        let DefaultIndex(index_uid) = ctx.data::<DefaultIndex>()?;
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
        run_search(ctx, index_uid, args).await
    }

    /// Search engine handle, from which indexes are discovered
    async fn meilisearch(&self) -> Engine {
        Engine
    }
}
