//! Cache Reaper Task
//!
//! Background task that periodically removes expired response cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, MAX_TTL};

// == Reaper Handle ==
/// Owns the reaper's shutdown signal and task handle.
///
/// Dropping the handle also stops the reaper, since the task exits as soon as
/// its shutdown channel closes.
#[must_use = "dropping the handle stops the reaper, so expired entries are never removed"]
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    // == Shutdown ==
    /// Signals the reaper to stop and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver is gone only if the task already exited
            let _ = tx.send(());
        }

        if let Err(e) = (&mut self.task).await {
            warn!("Cache reaper ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns the reaper for `store`, sweeping once every `period`.
///
/// The first sweep runs one full period after spawning, or `MAX_TTL` from now
/// if that deadline can't be represented. Each sweep holds the store's lock
/// for the whole scan.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(Duration::from_secs(5))));
/// let reaper = spawn_reaper(store.clone(), Duration::from_secs(5));
/// // Later, during shutdown:
/// reaper.shutdown().await;
/// ```
pub fn spawn_reaper(store: Arc<Mutex<CacheStore>>, period: Duration) -> ReaperHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
    let now = Instant::now();
    let first = now.checked_add(period).unwrap_or(now + MAX_TTL);
    let mut ticker = interval_at(first, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let task = tokio::spawn(async move {
        debug!("Starting cache reaper with period of {:?}", period);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    debug!("Cache reaper stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let (removed, remaining) = {
                        let mut guard = store.lock().await;
                        let removed = guard.sweep_expired();
                        (removed, guard.len())
                    };

                    if removed > 0 {
                        info!(
                            "Cache sweep: removed {} expired entries, {} remaining",
                            removed, remaining
                        );
                    } else {
                        debug!("Cache sweep: no expired entries found");
                    }
                }
            }
        }
    });

    ReaperHandle {
        shutdown_tx: Some(shutdown_tx),
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(5);

    fn new_store() -> Arc<Mutex<CacheStore>> {
        Arc::new(Mutex::new(CacheStore::new(TTL)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_expired_entries() {
        let store = new_store();
        store.lock().await.add("expire_soon", "value");

        let reaper = spawn_reaper(store.clone(), TTL);
        tokio::time::sleep(Duration::from_millis(5100)).await;

        assert!(store.lock().await.is_empty(), "Expired entry should have been reaped");
        reaper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_preserves_fresh_entries() {
        let store = new_store();
        let reaper = spawn_reaper(store.clone(), TTL);

        tokio::time::sleep(Duration::from_secs(3)).await;
        store.lock().await.add("fresh", "value");

        // First sweep at 5s sees a 2s old entry
        tokio::time::sleep(Duration::from_millis(2100)).await;

        let mut guard = store.lock().await;
        assert_eq!(guard.get("fresh").as_deref(), Some(&b"value"[..]));
        drop(guard);
        reaper.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sweep_before_first_period() {
        let store = new_store();
        store.lock().await.add("key", "value");
        let reaper = spawn_reaper(store.clone(), TTL);

        tokio::time::sleep(Duration::from_millis(4900)).await;

        assert_eq!(store.lock().await.stats().reaped, 0);
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_unrepresentable_period_does_not_panic() {
        let store = new_store();
        store.lock().await.add("key", "value");
        let reaper = spawn_reaper(store.clone(), Duration::MAX);
        tokio::task::yield_now().await;

        assert!(!reaper.is_finished());
        assert_eq!(store.lock().await.len(), 1);
        reaper.shutdown().await;
    }

    #[tokio::test]
    async fn test_dropping_handle_stops_task() {
        let reaper = spawn_reaper(new_store(), TTL);
        let ReaperHandle { shutdown_tx, task } = reaper;

        drop(shutdown_tx);

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("reaper should exit once its handle is dropped")
            .unwrap();
    }

    #[tokio::test]
    async fn test_runs_until_shutdown() {
        let reaper = spawn_reaper(new_store(), TTL);
        tokio::task::yield_now().await;
        assert!(!reaper.is_finished());

        tokio::time::timeout(Duration::from_secs(1), reaper.shutdown())
            .await
            .expect("shutdown should join the reaper promptly");
    }
}
