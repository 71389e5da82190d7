//! PokeAPI Module
//!
//! HTTP access to PokeAPI and the models decoded from its responses.
//!
//! # Endpoints used
//! - `GET /location-area?offset=..&limit=..` - A page of location areas
//! - `GET /location-area/{name}` - Pokemon encounters in one area
//! - `GET /pokemon/{name}` - A single Pokemon

pub mod client;
pub mod models;

pub use client::PokeApiClient;
pub use models::{
    LocationAreaDetail, LocationAreasPage, NamedResource, Pokemon, PokemonEncounter, PokemonStat,
    PokemonType,
};
