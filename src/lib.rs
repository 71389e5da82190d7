//! Pokedex CLI - An interactive PokeAPI client
//!
//! Browses location areas, explores them and catches Pokemon, with raw API
//! responses held in a short-lived in-memory cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod pokeapi;
pub mod repl;
pub mod tasks;

pub use cache::ResponseCache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use pokeapi::PokeApiClient;
pub use tasks::ReaperHandle;
