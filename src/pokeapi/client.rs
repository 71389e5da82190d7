//! PokeAPI client
//!
//! Fetch-or-populate access to PokeAPI: every GET first consults the injected
//! `ResponseCache`, falls back to the network on a miss, and caches only
//! successful response bodies. Decoding always happens here, never in the cache.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::{LocationAreaDetail, LocationAreasPage, Pokemon};
use crate::cache::ResponseCache;
use crate::error::{PokedexError, Result};

/// Client for PokeAPI backed by a short-lived response cache.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: Url,
    cache: ResponseCache,
}

impl PokeApiClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, cache: ResponseCache) -> Result<Self> {
        Self::with_client(Client::new(), base_url, cache)
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(http: Client, base_url: &str, cache: ResponseCache) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        Ok(Self {
            http,
            base_url,
            cache,
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Fetches one page of location areas.
    pub async fn location_areas(&self, offset: u32, limit: u32) -> Result<LocationAreasPage> {
        let url = self.location_areas_url(offset, limit)?;
        let name = format!("offset={offset}, limit={limit}");
        self.get_json(&url, "Location-area page", &name).await
    }

    /// Fetches a single location area and the Pokemon that can be met there.
    pub async fn location_area(&self, name: &str) -> Result<LocationAreaDetail> {
        let url = self.endpoint(&["location-area", name])?;
        self.get_json(&url, "Location-area", name).await
    }

    /// Fetches a single Pokemon.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = self.endpoint(&["pokemon", name])?;
        self.get_json(&url, "Pokemon", name).await
    }

    /// Builds the canonical URL for a page of location areas.
    ///
    /// Query parameters are always written as `offset` then `limit`, the same
    /// order PokeAPI uses in its own page links.
    pub fn location_areas_url(&self, offset: u32, limit: u32) -> Result<Url> {
        let mut url = self.endpoint(&["location-area"])?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    // == Fetch Or Populate ==
    /// Returns the raw body for `url`, from cache when possible.
    ///
    /// On a miss the body is requested from upstream and cached only if the
    /// status was successful. A 404 becomes `NotFound` for `resource`/`name`.
    pub async fn fetch_or_populate(
        &self,
        url: &Url,
        resource: &'static str,
        name: &str,
    ) -> Result<Bytes> {
        let key = url.as_str();

        if let Some(body) = self.cache.get(key).await {
            debug!("Cache hit for {}", key);
            return Ok(body);
        }

        debug!("Cache miss for {}, requesting upstream", key);
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound {
                resource,
                name: name.to_string(),
            });
        }
        if !status.is_success() {
            warn!("Upstream returned {} for {}", status, key);
            return Err(PokedexError::Status {
                url: key.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        self.cache.add(key, body.clone()).await;
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        resource: &'static str,
        name: &str,
    ) -> Result<T> {
        let body = self.fetch_or_populate(url, resource, name).await?;

        serde_json::from_slice(&body).map_err(|source| PokedexError::Decode {
            url: url.to_string(),
            source,
        })
    }

    // Appends path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
