//! In-process stand-in for PokeAPI used by the integration tests.
//!
//! Serves a fixed set of location areas and Pokemon and counts every request
//! it answers, so tests can tell cache hits from network round trips.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

pub const TOTAL_AREAS: u32 = 45;

#[derive(Clone)]
struct FakeApi {
    base: String,
    hits: Arc<AtomicUsize>,
}

/// Handle to a running fake server.
pub struct FakePokeApi {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakePokeApi {
    /// Number of requests the server has answered so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts the fake server on an ephemeral local port.
pub async fn spawn_fake_pokeapi() -> FakePokeApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/api/v2/", addr);
    let hits = Arc::new(AtomicUsize::new(0));

    let state = FakeApi {
        base: base_url.clone(),
        hits: hits.clone(),
    };
    let app = Router::new()
        .route("/api/v2/location-area", get(list_areas))
        .route("/api/v2/location-area/:name", get(area_detail))
        .route("/api/v2/pokemon/:name", get(pokemon))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakePokeApi { base_url, hits }
}

pub fn area_name(index: u32) -> String {
    format!("area-{}", index)
}

async fn list_areas(
    State(api): State<FakeApi>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);

    let param = |key: &str, default: u32| {
        params
            .get(key)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(default)
    };
    let offset = param("offset", 0);
    let limit = param("limit", 20);
    let end = (offset + limit).min(TOTAL_AREAS);

    let results: Vec<_> = (offset..end)
        .map(|i| json!({ "name": area_name(i), "url": format!("{}location-area/{}/", api.base, i) }))
        .collect();
    let next = (end < TOTAL_AREAS)
        .then(|| format!("{}location-area?offset={}&limit={}", api.base, end, limit));
    let previous = (offset > 0).then(|| {
        format!(
            "{}location-area?offset={}&limit={}",
            api.base,
            offset.saturating_sub(limit),
            limit
        )
    });

    Json(json!({
        "count": TOTAL_AREAS,
        "next": next,
        "previous": previous,
        "results": results,
    }))
    .into_response()
}

async fn area_detail(State(api): State<FakeApi>, Path(name): Path<String>) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);

    match name.as_str() {
        "canalave-city-area" => Json(json!({
            "id": 1,
            "name": "canalave-city-area",
            "pokemon_encounters": [
                { "pokemon": { "name": "tentacool", "url": "u" } },
                { "pokemon": { "name": "staryu", "url": "u" } }
            ]
        }))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

async fn pokemon(State(api): State<FakeApi>, Path(name): Path<String>) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);

    match name.as_str() {
        "pikachu" => Json(json!({
            "id": 25,
            "name": "pikachu",
            "base_experience": 64,
            "height": 4,
            "weight": 60,
            "stats": [
                { "base_stat": 35, "effort": 0, "stat": { "name": "hp", "url": "u" } },
                { "base_stat": 55, "effort": 0, "stat": { "name": "attack", "url": "u" } }
            ],
            "types": [
                { "slot": 1, "type": { "name": "electric", "url": "u" } }
            ]
        }))
        .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "garbled" => (StatusCode::OK, "{ not json").into_response(),
        _ => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
