//! Pokedex CLI - An interactive PokeAPI client
//!
//! Browses location areas, explores them and catches Pokemon, with raw API
//! responses held in a short-lived in-memory cache.

use std::io;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex_cli::repl::{self, Session};
use pokedex_cli::{Config, PokeApiClient, ResponseCache};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so REPL output stays clean)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Build the PokeAPI client around the cache
/// 5. Run the REPL until `exit`, end of input, or Ctrl+C
/// 6. Stop the reaper and report cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn", can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_cli=warn,pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, base_url={}, page_size={}",
        config.cache_ttl_secs, config.base_url, config.page_size
    );

    let (cache, reaper) = ResponseCache::new(config.cache_ttl());
    info!("Response cache initialized, reaper running");

    let client = PokeApiClient::new(&config.base_url, cache.clone())
        .with_context(|| format!("invalid POKEAPI_BASE_URL {:?}", config.base_url))?;
    let mut session = Session::new(client, config.page_size, config.catch_seed);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    let interrupted = tokio::select! {
        result = repl::run(&mut session, stdin, &mut stdout) => {
            result.context("REPL failed")?;
            false
        }
        _ = signal::ctrl_c() => {
            println!();
            info!("Received Ctrl+C, shutting down...");
            true
        }
    };

    reaper.shutdown().await;
    let stats = cache.stats().await;
    info!(
        "Cache stats: hits={}, misses={}, reaped={}, entries={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.reaped,
        stats.total_entries,
        stats.hit_rate()
    );

    if interrupted {
        // tokio's stdin reader blocks a runtime thread that can't be cancelled
        debug!("Exiting without waiting for pending input");
        std::process::exit(130);
    }

    Ok(())
}
