//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::MAX_TTL;

/// PokeAPI's public v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

const DEFAULT_CACHE_TTL_SECS: u64 = 5;
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long cached responses live before the reaper may remove them, in seconds
    pub cache_ttl_secs: u64,
    /// Root of the PokeAPI endpoints
    pub base_url: String,
    /// Number of location areas per `map` page
    pub page_size: u32,
    /// Fixed seed for catch rolls; `None` seeds from entropy
    pub catch_seed: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_TTL_SECS` - Response cache TTL in seconds (default: 5, zero is ignored, capped at one year)
    /// - `POKEAPI_BASE_URL` - API root (default: https://pokeapi.co/api/v2/)
    /// - `POKEDEX_PAGE_SIZE` - Location areas per page (default: 20, zero is ignored)
    /// - `POKEDEX_CATCH_SEED` - Seed for catch rolls (default: unset)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_secs: parse_var("POKEDEX_CACHE_TTL_SECS")
                .filter(|&ttl: &u64| ttl > 0)
                .map(|ttl| ttl.min(MAX_TTL.as_secs()))
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            page_size: parse_var("POKEDEX_PAGE_SIZE")
                .filter(|&size: &u32| size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            catch_seed: parse_var("POKEDEX_CATCH_SEED"),
        }
    }

    /// Returns the cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs).min(MAX_TTL)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            catch_seed: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
