//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The response cache has no
//! failure modes of its own; everything here comes from fetching and decoding.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for talking to PokeAPI.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered 404 for a named resource
    #[error("{resource} '{name}' not found")]
    NotFound { resource: &'static str, name: String },

    /// Upstream answered with any other non-success status
    #[error("Invalid HTTP response code from {url}, status: {status}")]
    Status { url: String, status: StatusCode },

    /// Response body was not the JSON we expected
    #[error("Error decoding response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request URL could not be built or parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A pagination link lacked usable `offset`/`limit` parameters
    #[error("Invalid page link: {0}")]
    InvalidPageLink(String),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PokedexError {
    /// True for upstream 404s, which the REPL reports as a friendly message.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::NotFound { .. })
    }
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
