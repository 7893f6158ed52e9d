//! HTTP client for making requests to the search engine

use crate::config::{MeilisearchSettings, OutgoingSettings};
use crate::error::{GatewayError, Result};
use anyhow::Context;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// HTTP client wrapper bound to one engine base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client with default outgoing settings
    pub fn new(engine: &MeilisearchSettings) -> anyhow::Result<Self> {
        Self::with_settings(engine, &OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(
        engine: &MeilisearchSettings,
        settings: &OutgoingSettings,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(engine.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(format!("meili-gateway/{}", crate::VERSION))
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;
        let base_url = Url::parse(&engine.host)
            .with_context(|| format!("invalid search engine host: {}", engine.host))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("search engine host cannot be a base URL: {}", engine.host);
        }

        Ok(Self {
            client,
            base_url,
            api_key: engine.api_key.clone(),
        })
    }

    /// Engine base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET a JSON document
    ///
    /// `segments` are the API path components; each one is percent-encoded
    /// on its own, so caller-supplied names cannot add path levels.
    /// `index_uid` names the index the path refers to, so that a 404 can be
    /// reported as a missing index.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        index_uid: Option<&str>,
    ) -> Result<T> {
        let url = self.endpoint(segments);
        let mut request = self.request(Method::GET, url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request, url.path(), index_uid).await
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post_json<T, B>(
        &self,
        segments: &[&str],
        body: &B,
        index_uid: Option<&str>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments);
        let request = self.request(Method::POST, url.clone()).json(body);
        self.execute(request, url.path(), index_uid).await
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        builder
    }

    /// Append API path segments to the base URL, keeping any base path prefix
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor: the base URL always has path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
        index_uid: Option<&str>,
    ) -> Result<T> {
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            warn!("Search engine request to {} failed: {}", path, e);
            GatewayError::SearchEngineUnavailable(e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await?;

        debug!(
            "{} {} in {}ms",
            status.as_u16(),
            path,
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            let err = GatewayError::from_engine_response(status.as_u16(), &text, index_uid);
            warn!("Search engine rejected {}: {}", path, err);
            return Err(err);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
